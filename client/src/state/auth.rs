//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! A reactive mirror of `labkit`'s `SessionStore`. The store stays the source
//! of truth; this copy is refreshed after login, logout, profile refresh and
//! forced sign-out so the route guard and header re-render.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use labkit::SessionState;
use labkit::api::auth::{Role, UserProfile};

/// Authentication state tracking the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
}

impl AuthState {
    pub fn from_session(session: &SessionState) -> Self {
        Self { authenticated: session.is_authenticated(), user: session.user.clone() }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Name shown in the header; falls back to the login name.
    pub fn display_name(&self) -> String {
        match &self.user {
            Some(user) if !user.name.trim().is_empty() => user.name.clone(),
            Some(user) => user.username.clone(),
            None => String::new(),
        }
    }

    pub fn role_label(&self) -> &'static str {
        match self.user.as_ref().and_then(UserProfile::role) {
            Some(Role::Admin) => "Administrator",
            Some(Role::Teacher) => "Teacher",
            Some(Role::Student) => "Student",
            None => "",
        }
    }
}
