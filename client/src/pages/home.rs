//! Signed-in shell: header, section navigation and the routed outlet.
//!
//! SYSTEM CONTEXT
//! ==============
//! Parent route for every section view. On mount it refreshes the profile so
//! role-dependent UI reflects server-side changes made since login.

use labkit::ApiClient;
use labkit::routes::LOGIN_PATH;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::components::guard::Guarded;
use crate::components::nav_menu::NavMenu;
use crate::state::auth::AuthState;

#[component]
pub fn HomeShell() -> impl IntoView {
    view! {
        <Guarded>
            <HomeLayout/>
        </Guarded>
    }
}

#[component]
fn HomeLayout() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            if api.refresh_profile().await.is_ok() {
                auth.set(AuthState::from_session(&api.session().snapshot()));
            }
        });
    }

    let on_logout = move |_| {
        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            api.logout().await;
            auth.set(AuthState::signed_out());
            navigate(LOGIN_PATH, NavigateOptions::default());
        });
    };

    view! {
        <div class="home">
            <header class="home__header">
                <span class="home__brand">"LabDesk"</span>
                <span class="home__user">
                    {move || auth.with(AuthState::display_name)}
                    <small class="home__role">{move || auth.with(AuthState::role_label)}</small>
                </span>
                <button class="home__logout" on:click=on_logout>"Sign out"</button>
            </header>
            <div class="home__body">
                <NavMenu/>
                <main class="home__content">
                    <Outlet/>
                </main>
            </div>
        </div>
    }
}
