//! Shared fixtures: a scripted HTTP backend and a recording event sink.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::api::auth::UserProfile;
use crate::config::ClientConfig;
use crate::session::{KeyValueStore, MemoryStore, SessionStore, TOKEN_KEY, USER_INFO_KEY};
use crate::transport::{
    ApiClient, EventSink, HttpBackend, HttpRequest, HttpResponse, NavigationIntent, TransportFailure,
};

// =============================================================================
// MockBackend
// =============================================================================

/// Replays queued responses in order and records every request. An empty
/// queue answers with `{code: 200, data: null}`.
#[derive(Default)]
pub(crate) struct MockBackend {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportFailure>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockBackend {
    pub(crate) fn push_status(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse { status, body: body.to_owned() }));
    }

    pub(crate) fn push_envelope(&self, envelope: Value) {
        self.push_status(200, &envelope.to_string());
    }

    pub(crate) fn push_data(&self, data: Value) {
        self.push_envelope(json!({ "code": 200, "message": "success", "data": data }));
    }

    pub(crate) fn push_failure(&self, reason: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportFailure::new(reason)));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }

    pub(crate) fn last_body(&self) -> Value {
        let body = self.last_request().body.expect("request had no body");
        serde_json::from_str(&body).unwrap()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpBackend for MockBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(HttpResponse { status: 200, body: json!({ "code": 200, "message": "success", "data": null }).to_string() })
        })
    }
}

// =============================================================================
// RecordingSink
// =============================================================================

#[derive(Default)]
pub(crate) struct RecordingSink {
    toasts: Mutex<Vec<String>>,
    intents: Mutex<Vec<NavigationIntent>>,
}

impl RecordingSink {
    pub(crate) fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().clone()
    }

    pub(crate) fn intents(&self) -> Vec<NavigationIntent> {
        self.intents.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn toast(&self, message: &str) {
        self.toasts.lock().unwrap().push(message.to_owned());
    }

    fn navigate(&self, intent: NavigationIntent) {
        self.intents.lock().unwrap().push(intent);
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub(crate) fn profile_json() -> Value {
    json!({
        "id": 7,
        "username": "alice",
        "name": "Alice Zhang",
        "email": "alice@lab.test",
        "phone": null,
        "department": "Physics",
        "roleCode": "teacher",
        "status": 1
    })
}

pub(crate) fn sample_profile() -> UserProfile {
    serde_json::from_value(profile_json()).unwrap()
}

pub(crate) struct Harness {
    pub api: ApiClient,
    pub backend: Arc<MockBackend>,
    pub sink: Arc<RecordingSink>,
    pub storage: Arc<MemoryStore>,
}

impl Harness {
    pub(crate) fn stored(&self, key: &str) -> Option<String> {
        self.storage.get(key)
    }
}

fn build(storage: Arc<MemoryStore>) -> Harness {
    let backend = Arc::new(MockBackend::default());
    let sink = Arc::new(RecordingSink::default());
    let session = Arc::new(SessionStore::load(storage.clone()));
    let api = ApiClient::new(ClientConfig::new("http://lab.test/api/v1"), backend.clone(), session)
        .with_events(sink.clone());
    Harness { api, backend, sink, storage }
}

/// Client with an empty session.
pub(crate) fn harness() -> Harness {
    build(Arc::new(MemoryStore::new()))
}

/// Client whose storage already holds `token` and the sample profile.
pub(crate) fn signed_in_harness(token: &str) -> Harness {
    let storage = MemoryStore::with_entries([
        (TOKEN_KEY.to_owned(), token.to_owned()),
        (USER_INFO_KEY.to_owned(), profile_json().to_string()),
    ]);
    build(Arc::new(storage))
}
