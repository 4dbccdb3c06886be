//! Session store: bearer token plus current user profile, persisted to a
//! key-value store under fixed keys.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is constructed at startup, hydrated from storage and
//! shared by reference with the [`ApiClient`]. It is mutated only by login,
//! logout, profile refresh, and the transport's invalidation on 401.
//!
//! DESIGN
//! ======
//! Every mutation writes storage and memory while holding the state lock, so
//! the two never diverge and no other mutation interleaves. Token and profile
//! are set together or not at all.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::auth::{self, LoginRequest, Role, UserProfile};
use crate::error::ApiError;
use crate::transport::ApiClient;

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";
pub const LOGIN_FAILED_MESSAGE: &str = "login failed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to serialize `{key}`: {reason}")]
    Serialize { key: String, reason: String },
}

/// Durable string key-value storage (browser `localStorage`, a file, memory).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

/// Process-local store; the default for tests and storage-less hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self { entries: Mutex::new(entries.into_iter().collect()) }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

/// Point-in-time copy of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_role(role))
    }
}

pub struct SessionStore {
    state: Mutex<SessionState>,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Hydrate from persisted storage. An unreadable profile, or a profile
    /// persisted without a token, is dropped from both memory and storage.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        if token.is_none() {
            storage.remove(TOKEN_KEY);
        }

        let user = storage.get(USER_INFO_KEY).and_then(|raw| {
            serde_json::from_str::<UserProfile>(&raw)
                .map_err(|e| tracing::warn!(error = %e, "discarding unreadable persisted profile"))
                .ok()
        });
        let user = if token.is_some() { user } else { None };
        if user.is_none() {
            storage.remove(USER_INFO_KEY);
        }

        tracing::debug!(authenticated = token.is_some(), "session hydrated");
        Self { state: Mutex::new(SessionState { token, user }), storage }
    }

    /// Session backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryStore::new()))
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state().token.clone().filter(|t| !t.is_empty())
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.state().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.state().has_role(role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.has_role(Role::Teacher)
    }

    #[must_use]
    pub fn is_student(&self) -> bool {
        self.has_role(Role::Student)
    }

    /// Persist and adopt a new token + profile pair.
    pub(crate) fn establish(&self, token: &str, user: &UserProfile) -> Result<(), StorageError> {
        let raw_user = encode_profile(user)?;
        let mut state = self.state();

        self.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = self.storage.set(USER_INFO_KEY, &raw_user) {
            self.restore_storage(&state);
            return Err(e);
        }

        state.token = Some(token.to_owned());
        state.user = Some(user.clone());
        Ok(())
    }

    /// Drop token and profile from memory and storage. Idempotent.
    pub(crate) fn invalidate(&self) {
        let mut state = self.state();
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_INFO_KEY);
        *state = SessionState::default();
    }

    /// Swap in a refreshed profile. Skipped when signed out so a profile
    /// never outlives its token.
    pub(crate) fn replace_user(&self, user: &UserProfile) -> Result<bool, StorageError> {
        let raw_user = encode_profile(user)?;
        let mut state = self.state();
        if !state.is_authenticated() {
            return Ok(false);
        }
        self.storage.set(USER_INFO_KEY, &raw_user)?;
        state.user = Some(user.clone());
        Ok(true)
    }

    fn restore_storage(&self, previous: &SessionState) {
        match &previous.token {
            Some(token) => {
                let _ = self.storage.set(TOKEN_KEY, token);
            }
            None => self.storage.remove(TOKEN_KEY),
        }
        match previous.user.as_ref().map(encode_profile) {
            Some(Ok(raw)) => {
                let _ = self.storage.set(USER_INFO_KEY, &raw);
            }
            _ => self.storage.remove(USER_INFO_KEY),
        }
    }
}

fn encode_profile(user: &UserProfile) -> Result<String, StorageError> {
    serde_json::to_string(user)
        .map_err(|e| StorageError::Serialize { key: USER_INFO_KEY.to_owned(), reason: e.to_string() })
}

// =============================================================================
// SESSION OPERATIONS
// =============================================================================

impl ApiClient {
    /// Authenticate and establish the session.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message; "login failed" when the
    /// error carries none or the server returned no credentials. Nothing is
    /// written on failure.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), String> {
        let response = match auth::login(self, credentials).await {
            Ok(Some(response)) if !response.token.is_empty() => response,
            Ok(_) => return Err(LOGIN_FAILED_MESSAGE.to_owned()),
            Err(e) => return Err(login_failure_message(&e)),
        };

        self.session()
            .establish(&response.token, &response.user_info)
            .map_err(|e| {
                tracing::warn!(error = %e, "could not persist session");
                LOGIN_FAILED_MESSAGE.to_owned()
            })?;
        tracing::info!(username = %response.user_info.username, "logged in");
        Ok(())
    }

    /// End the session. The server call is best-effort; local state is
    /// cleared regardless of its outcome.
    pub async fn logout(&self) {
        if let Err(e) = auth::logout(self).await {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }
        self.session().invalidate();
        tracing::info!("logged out");
    }

    /// Re-fetch the current user and replace the stored profile.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`ApiError`]. Returns
    /// [`ApiError::Storage`] when the profile cannot be persisted and
    /// [`ApiError::SignedOut`] when the session ended before it arrived. In
    /// every error case the existing state is untouched.
    pub async fn refresh_profile(&self) -> Result<UserProfile, ApiError> {
        let profile = auth::current_user(self).await?;
        match self.session().replace_user(&profile) {
            Ok(true) => Ok(profile),
            Ok(false) => {
                tracing::debug!("profile fetched while signed out; not stored");
                Err(self.reject(ApiError::SignedOut))
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not persist refreshed profile");
                Err(self.reject(ApiError::Storage(e)))
            }
        }
    }
}

fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Encode(_) | ApiError::Decode(_) => LOGIN_FAILED_MESSAGE.to_owned(),
        other => other.message().to_owned(),
    }
}
