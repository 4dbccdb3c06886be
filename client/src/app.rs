//! Root application component with routing and context providers.

use std::sync::Arc;

use labkit::{ApiClient, ClientConfig, NavigationIntent, SessionStore};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::components::guard::{Guarded, IntentRedirect};
use crate::components::toast_stack::ToastStack;
use crate::net::backend::BrowserBackend;
use crate::net::events::SignalSink;
use crate::pages::home::HomeShell;
use crate::pages::login::LoginPage;
use crate::pages::section::{AboutPage, HomeIndex, NotFoundPage, SectionPage};
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::storage::LocalStorageStore;

/// API base compiled into the bundle; falls back to the shared default.
fn api_config() -> ClientConfig {
    ClientConfig::new(option_env!("LABDESK_API_BASE").unwrap_or(labkit::config::DEFAULT_BASE_URL))
}

/// Root application component.
///
/// Builds the session and API client once, then provides them and all
/// reactive state to child components.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Arc::new(SessionStore::load(Arc::new(LocalStorageStore)));
    let auth = RwSignal::new(AuthState::from_session(&session.snapshot()));
    let toasts = RwSignal::new(ToastState::default());
    let intent = RwSignal::new(None::<NavigationIntent>);

    let sink = SignalSink { auth, toasts, intent };
    let api = ApiClient::new(api_config(), Arc::new(BrowserBackend), session).with_events(Arc::new(sink));

    provide_context(api);
    provide_context(auth);
    provide_context(toasts);
    provide_context(intent);

    view! {
        <Title text="LabDesk"/>

        <Router>
            <IntentRedirect/>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/login") view=|| view! { <Guarded><LoginPage/></Guarded> }/>
                <Route path=path!("/about") view=AboutPage/>
                <ParentRoute path=path!("/") view=HomeShell>
                    <Route path=path!("") view=HomeIndex/>
                    <Route path=path!("laboratory") view=SectionPage/>
                    <Route path=path!("equipment") view=SectionPage/>
                    <Route path=path!("borrow/apply") view=SectionPage/>
                    <Route path=path!("borrow/my") view=SectionPage/>
                    <Route path=path!("borrow/approval") view=SectionPage/>
                    <Route path=path!("reservation/apply") view=SectionPage/>
                    <Route path=path!("reservation/my") view=SectionPage/>
                    <Route path=path!("reservation/approval") view=SectionPage/>
                    <Route path=path!("repair/apply") view=SectionPage/>
                    <Route path=path!("repair/my") view=SectionPage/>
                    <Route path=path!("repair/management") view=SectionPage/>
                    <Route path=path!("scrap/apply") view=SectionPage/>
                    <Route path=path!("scrap/my") view=SectionPage/>
                    <Route path=path!("scrap/approval") view=SectionPage/>
                </ParentRoute>
            </Routes>
        </Router>
        <ToastStack/>
    }
}
