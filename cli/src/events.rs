//! Terminal rendering of transport side effects.
//!
//! Toasts become one `error:` line on stderr. A login intent cannot move the
//! user anywhere, so it prints how to sign in again.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use labkit::{EventSink, NavigationIntent};

fn intent_notice(intent: NavigationIntent) -> &'static str {
    match intent {
        NavigationIntent::Login => "session expired or invalid; run `labdesk login` to sign in again",
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StderrSink;

impl EventSink for StderrSink {
    fn toast(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn navigate(&self, intent: NavigationIntent) {
        eprintln!("{}", intent_notice(intent));
    }
}
