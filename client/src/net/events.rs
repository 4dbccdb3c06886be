//! Reactive `EventSink`: failed calls become toasts, auth failures become a
//! pending navigation intent.
//!
//! SYSTEM CONTEXT
//! ==============
//! `labkit` invalidates the session before emitting the login intent, so the
//! sink only has to mirror that into `AuthState` and park the intent for
//! `IntentRedirect`, which resolves it against the current location.

use labkit::{EventSink, NavigationIntent};
use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::toast::ToastState;

#[derive(Clone, Copy)]
pub struct SignalSink {
    pub auth: RwSignal<AuthState>,
    pub toasts: RwSignal<ToastState>,
    pub intent: RwSignal<Option<NavigationIntent>>,
}

impl EventSink for SignalSink {
    fn toast(&self, message: &str) {
        let Some(id) = self.toasts.try_update(|state| state.push(message)) else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            let toasts = self.toasts;
            gloo_timers::callback::Timeout::new(crate::state::toast::TOAST_LIFETIME_MS, move || {
                let _ = toasts.try_update(|state| state.dismiss(id));
            })
            .forget();
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = id;
        }
    }

    fn navigate(&self, intent: NavigationIntent) {
        let _ = self.auth.try_set(AuthState::signed_out());
        let _ = self.intent.try_set(Some(intent));
    }
}
