use super::*;
use crate::error::NETWORK_ERROR_MESSAGE;
use crate::test_helpers::{harness, profile_json, sample_profile, signed_in_harness};
use crate::transport::NavigationIntent;
use serde_json::json;

fn login_payload(token: &str) -> serde_json::Value {
    json!({ "token": token, "userInfo": profile_json() })
}

/// Store whose writes to one key always fail.
struct FailingStore {
    inner: MemoryStore,
    failing_key: &'static str,
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.failing_key {
            return Err(StorageError::Write { key: key.to_owned(), reason: "quota exceeded".to_owned() });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

// =========================================================================
// hydration
// =========================================================================

#[test]
fn load_empty_storage_is_signed_out() {
    let store = SessionStore::in_memory();
    assert_eq!(store.snapshot(), SessionState::default());
    assert!(!store.is_authenticated());
    assert!(!store.is_admin());
}

#[test]
fn load_restores_token_and_profile() {
    let storage = Arc::new(MemoryStore::with_entries([
        (TOKEN_KEY.to_owned(), "t0".to_owned()),
        (USER_INFO_KEY.to_owned(), profile_json().to_string()),
    ]));
    let store = SessionStore::load(storage);
    assert_eq!(store.token().as_deref(), Some("t0"));
    assert_eq!(store.user(), Some(sample_profile()));
    assert!(store.is_teacher());
}

#[test]
fn load_discards_unreadable_profile() {
    let storage = Arc::new(MemoryStore::with_entries([
        (TOKEN_KEY.to_owned(), "t0".to_owned()),
        (USER_INFO_KEY.to_owned(), "{not json".to_owned()),
    ]));
    let store = SessionStore::load(storage.clone());
    assert!(store.is_authenticated());
    assert_eq!(store.user(), None);
    assert_eq!(storage.get(USER_INFO_KEY), None);
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t0"));
}

#[test]
fn load_discards_profile_without_token() {
    let storage = Arc::new(MemoryStore::with_entries([
        (TOKEN_KEY.to_owned(), String::new()),
        (USER_INFO_KEY.to_owned(), profile_json().to_string()),
    ]));
    let store = SessionStore::load(storage.clone());
    assert!(!store.is_authenticated());
    assert_eq!(store.user(), None);
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_INFO_KEY), None);
}

// =========================================================================
// role predicates
// =========================================================================

#[test]
fn role_predicates_follow_role_code() {
    let mut state = SessionState { token: Some("t".to_owned()), user: Some(sample_profile()) };
    assert!(state.has_role(Role::Teacher));
    assert!(!state.has_role(Role::Admin));

    if let Some(user) = state.user.as_mut() {
        user.role_code = "admin".to_owned();
    }
    assert!(state.has_role(Role::Admin));
    assert!(!state.has_role(Role::Student));
}

#[test]
fn unknown_role_code_matches_nothing() {
    let mut profile = sample_profile();
    profile.role_code = "auditor".to_owned();
    let state = SessionState { token: Some("t".to_owned()), user: Some(profile) };
    assert!(!state.has_role(Role::Admin));
    assert!(!state.has_role(Role::Teacher));
    assert!(!state.has_role(Role::Student));
}

#[test]
fn no_profile_means_no_role() {
    let state = SessionState { token: Some("t".to_owned()), user: None };
    assert!(state.is_authenticated());
    assert!(!state.has_role(Role::Student));
}

// =========================================================================
// login
// =========================================================================

#[tokio::test]
async fn login_persists_token_and_profile() {
    let h = harness();
    h.backend.push_data(login_payload("t1"));

    h.api.login(&LoginRequest::new("alice", "secret")).await.unwrap();

    assert_eq!(h.api.session().token().as_deref(), Some("t1"));
    assert_eq!(h.api.session().user(), Some(sample_profile()));
    assert_eq!(h.stored(TOKEN_KEY).as_deref(), Some("t1"));
    let persisted: UserProfile = serde_json::from_str(&h.stored(USER_INFO_KEY).unwrap()).unwrap();
    assert_eq!(persisted, sample_profile());

    let req = h.backend.last_request();
    assert_eq!(req.url, "http://lab.test/api/v1/auth/login");
    assert_eq!(h.backend.last_body(), json!({ "username": "alice", "password": "secret" }));
}

#[tokio::test]
async fn login_replaces_previous_session() {
    let h = signed_in_harness("old");
    h.backend.push_data(login_payload("new"));
    h.api.login(&LoginRequest::new("alice", "secret")).await.unwrap();
    assert_eq!(h.stored(TOKEN_KEY).as_deref(), Some("new"));
    // The old token authorizes the login call itself.
    assert_eq!(h.backend.last_request().header("Authorization"), Some("Bearer old"));
}

#[tokio::test]
async fn login_rejects_server_message() {
    let h = harness();
    h.backend.push_envelope(json!({ "code": 400, "message": "invalid username or password" }));
    let err = h.api.login(&LoginRequest::new("alice", "wrong")).await.unwrap_err();
    assert_eq!(err, "invalid username or password");
    assert!(!h.api.session().is_authenticated());
    assert_eq!(h.stored(TOKEN_KEY), None);
}

#[tokio::test]
async fn login_without_payload_fails_generically() {
    let h = harness();
    h.backend.push_data(serde_json::Value::Null);
    let err = h.api.login(&LoginRequest::new("alice", "secret")).await.unwrap_err();
    assert_eq!(err, LOGIN_FAILED_MESSAGE);
    assert!(!h.api.session().is_authenticated());
}

#[tokio::test]
async fn login_with_empty_token_fails_generically() {
    let h = harness();
    h.backend.push_data(login_payload(""));
    let err = h.api.login(&LoginRequest::new("alice", "secret")).await.unwrap_err();
    assert_eq!(err, LOGIN_FAILED_MESSAGE);
    assert_eq!(h.stored(USER_INFO_KEY), None);
}

#[tokio::test]
async fn login_with_malformed_payload_fails_generically() {
    let h = harness();
    h.backend.push_data(json!({ "token": "t1" }));
    let err = h.api.login(&LoginRequest::new("alice", "secret")).await.unwrap_err();
    assert_eq!(err, LOGIN_FAILED_MESSAGE);
}

#[tokio::test]
async fn login_network_failure_reports_network_message() {
    let h = harness();
    h.backend.push_failure("dns");
    let err = h.api.login(&LoginRequest::new("alice", "secret")).await.unwrap_err();
    assert_eq!(err, NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn login_rolls_back_when_profile_cannot_be_stored() {
    let storage = Arc::new(FailingStore { inner: MemoryStore::new(), failing_key: USER_INFO_KEY });
    let session = Arc::new(SessionStore::load(storage.clone()));
    let h = harness();
    let api = ApiClient::new(h.api.config().clone(), h.backend.clone(), session);
    h.backend.push_data(login_payload("t1"));

    let err = api.login(&LoginRequest::new("alice", "secret")).await.unwrap_err();
    assert_eq!(err, LOGIN_FAILED_MESSAGE);
    assert!(!api.session().is_authenticated());
    assert_eq!(storage.get(TOKEN_KEY), None);
}

// =========================================================================
// logout
// =========================================================================

#[tokio::test]
async fn logout_clears_session() {
    let h = signed_in_harness("t1");
    h.api.logout().await;
    assert_eq!(h.api.session().snapshot(), SessionState::default());
    assert_eq!(h.stored(TOKEN_KEY), None);
    assert_eq!(h.stored(USER_INFO_KEY), None);
    assert_eq!(h.backend.last_request().url, "http://lab.test/api/v1/auth/logout");
}

#[tokio::test]
async fn logout_clears_session_even_when_server_unreachable() {
    let h = signed_in_harness("t1");
    h.backend.push_failure("offline");
    h.api.logout().await;
    assert!(!h.api.session().is_authenticated());
    assert_eq!(h.stored(TOKEN_KEY), None);
}

#[tokio::test]
async fn logout_when_signed_out_is_harmless() {
    let h = harness();
    h.api.logout().await;
    h.api.logout().await;
    assert!(!h.api.session().is_authenticated());
}

// =========================================================================
// refresh_profile
// =========================================================================

#[tokio::test]
async fn refresh_profile_replaces_stored_profile() {
    let h = signed_in_harness("t1");
    let mut updated = profile_json();
    updated["name"] = json!("Alice Z.");
    updated["roleCode"] = json!("admin");
    h.backend.push_data(updated);

    let profile = h.api.refresh_profile().await.unwrap();
    assert_eq!(profile.name, "Alice Z.");
    assert!(h.api.session().is_admin());
    assert_eq!(h.api.session().token().as_deref(), Some("t1"));
    let persisted: UserProfile = serde_json::from_str(&h.stored(USER_INFO_KEY).unwrap()).unwrap();
    assert_eq!(persisted.name, "Alice Z.");
    assert_eq!(h.backend.last_request().url, "http://lab.test/api/v1/auth/me");
}

#[tokio::test]
async fn refresh_profile_failure_leaves_state_untouched() {
    let h = signed_in_harness("t1");
    h.backend.push_status(500, "");
    let before = h.api.session().snapshot();
    assert!(h.api.refresh_profile().await.is_err());
    assert_eq!(h.api.session().snapshot(), before);
}

#[tokio::test]
async fn refresh_profile_unauthorized_clears_session() {
    let h = signed_in_harness("t1");
    h.backend.push_status(401, "");
    let err = h.api.refresh_profile().await.unwrap_err();
    assert!(err.is_auth_failure());
    assert!(!h.api.session().is_authenticated());
    assert_eq!(h.sink.intents(), vec![NavigationIntent::Login]);
}

#[tokio::test]
async fn refresh_profile_while_signed_out_does_not_store() {
    let h = harness();
    h.backend.push_data(profile_json());
    let err = h.api.refresh_profile().await.unwrap_err();
    assert_eq!(err, ApiError::SignedOut);
    assert_eq!(h.api.session().user(), None);
    assert_eq!(h.stored(USER_INFO_KEY), None);
    assert_eq!(h.sink.toasts().len(), 1);
    assert!(h.sink.intents().is_empty());
}

#[tokio::test]
async fn refresh_profile_reports_unpersisted_profile() {
    let storage = Arc::new(FailingStore {
        inner: MemoryStore::with_entries([
            (TOKEN_KEY.to_owned(), "t1".to_owned()),
            (USER_INFO_KEY.to_owned(), profile_json().to_string()),
        ]),
        failing_key: USER_INFO_KEY,
    });
    let session = Arc::new(SessionStore::load(storage.clone()));
    let h = harness();
    let api = ApiClient::new(h.api.config().clone(), h.backend.clone(), session).with_events(h.sink.clone());
    let mut updated = profile_json();
    updated["roleCode"] = json!("admin");
    h.backend.push_data(updated);
    let before = api.session().snapshot();

    let err = api.refresh_profile().await.unwrap_err();
    assert!(matches!(err, ApiError::Storage(StorageError::Write { .. })));
    assert!(!api.session().is_admin());
    assert_eq!(api.session().snapshot(), before);
    assert_eq!(storage.get(USER_INFO_KEY), Some(profile_json().to_string()));
    assert_eq!(h.sink.toasts().len(), 1);
}
