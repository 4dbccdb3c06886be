//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route guard and the transport's login intent both need the current
//! full path (path plus query) in the shape `labkit::routes` expects.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use labkit::NavigationIntent;
use labkit::routes;
use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// Join the router's pathname and search into one full path. Accepts the
/// search string with or without its leading `?`.
pub fn full_path(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

/// Navigate whenever the transport parks a login intent, unless the user is
/// already on the login page. The intent is consumed either way.
pub fn install_intent_redirect<F, P>(intent: RwSignal<Option<NavigationIntent>>, current_path: P, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
    P: Fn() -> String + 'static,
{
    Effect::new(move || {
        let Some(pending) = intent.get() else {
            return;
        };
        intent.set(None);
        if let Some(target) = routes::resolve_intent(pending, &current_path()) {
            navigate(&target, NavigateOptions::default());
        }
    });
}
