//! Transient error notifications raised by failed API calls.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// How many toasts stay on screen at once; older ones are dropped first.
pub const MAX_VISIBLE_TOASTS: usize = 4;
/// Milliseconds before a toast dismisses itself.
pub const TOAST_LIFETIME_MS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a message and return its id for later dismissal.
    pub fn push(&mut self, message: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, message: message.to_owned() });
        if self.items.len() > MAX_VISIBLE_TOASTS {
            let overflow = self.items.len() - MAX_VISIBLE_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }
}
