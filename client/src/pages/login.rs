//! Username + password login page.
//!
//! On success the session is already persisted by `labkit`; the page mirrors
//! it into `AuthState`. The page is mounted inside `Guarded`, which then sends
//! the signed-in user to the preserved `redirect` target, or home. That is the
//! only navigation a successful login triggers.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use labkit::ApiClient;
use labkit::api::auth::LoginRequest;
use leptos::prelude::*;

use crate::state::auth::AuthState;

fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Enter your username.");
    }
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (user, pass) = match validate_login_input(&username.get(), &password.get()) {
            Ok(input) => input,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let api = api.clone();
        leptos::task::spawn_local(async move {
            match api.login(&LoginRequest::new(&user, &pass)).await {
                Ok(()) => {
                    password.set(String::new());
                    info.set(String::new());
                    auth.set(AuthState::from_session(&api.session().snapshot()));
                }
                Err(msg) => info.set(msg),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"LabDesk"</h1>
                <p class="login-card__subtitle">"Laboratory equipment management"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
