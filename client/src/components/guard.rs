//! Route guard and navigation-intent consumer.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Guarded` wraps every routed view. The decision comes from
//! `labkit::routes::guard` and is computed before children render, so a
//! protected view never flashes for a signed-out user.

use labkit::NavigationIntent;
use labkit::routes::{self, NavigationDecision};
use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::Redirect;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::util::auth::{full_path, install_intent_redirect};

/// Render `children` only when the guard allows the current location.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();

    let decision = Memo::new(move |_| {
        let path = full_path(&location.pathname.get(), &location.search.get());
        routes::guard(&path, auth.with(AuthState::is_authenticated))
    });

    move || match decision.get() {
        NavigationDecision::Allow => children().into_any(),
        NavigationDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}

/// Consumes login intents raised by the transport. Must sit inside `Router`.
#[component]
pub fn IntentRedirect() -> impl IntoView {
    let intent = expect_context::<RwSignal<Option<NavigationIntent>>>();
    let location = use_location();
    let navigate = use_navigate();

    install_intent_redirect(
        intent,
        move || full_path(&location.pathname.get_untracked(), &location.search.get_untracked()),
        navigate,
    );
}
