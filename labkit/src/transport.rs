//! Authenticated request pipeline shared by every endpoint binding.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` attaches the session's bearer token, hands the exchange to an
//! [`HttpBackend`] (`gloo-net` in the browser, `reqwest` natively), unwraps the
//! response envelope and classifies failures. Side effects of a failure are
//! reported through an [`EventSink`]: exactly one toast per failed call and,
//! for authentication failures, one [`NavigationIntent::Login`] after the
//! session has been cleared.
//!
//! TRADE-OFFS
//! ==========
//! The transport never touches browser location. Redirects are intents the
//! routing layer resolves against the current path, which keeps this crate
//! usable from a CLI and keeps repeated 401s idempotent.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::session::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully prepared outgoing request, independent of the HTTP library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, if any.
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// URL with the query string appended and percent-encoded.
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.url)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request left but no response came back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no response received: {reason}")]
pub struct TransportFailure {
    pub reason: String,
}

impl TransportFailure {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Performs one HTTP exchange.
///
/// Futures are `?Send` so browser fetch futures qualify; implementations must
/// still be shareable so the client can live in reactive context.
#[async_trait::async_trait(?Send)]
pub trait HttpBackend: Send + Sync {
    /// Execute the request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportFailure`] only when no response was received. Any
    /// HTTP status, including 4xx/5xx, is a successful exchange.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

/// Redirect requested by the transport, resolved by the routing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationIntent {
    Login,
}

/// Receiver for user-visible side effects of failed calls.
pub trait EventSink: Send + Sync {
    /// Show a transient, non-blocking error notification.
    fn toast(&self, message: &str);
    /// Ask the routing layer to navigate.
    fn navigate(&self, intent: NavigationIntent);
}

/// Sink that only logs; used when no UI is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn toast(&self, message: &str) {
        tracing::warn!(%message, "api failure");
    }

    fn navigate(&self, intent: NavigationIntent) {
        tracing::info!(?intent, "navigation requested");
    }
}

/// Unwrapped envelope plus transport metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub code: i32,
    pub message: String,
    pub data: T,
}

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    backend: Arc<dyn HttpBackend>,
    session: Arc<SessionStore>,
    events: Arc<dyn EventSink>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ClientConfig, backend: Arc<dyn HttpBackend>, session: Arc<SessionStore>) -> Self {
        Self { config, backend, session, events: Arc::new(TracingSink) }
    }

    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::Get, path, None, Vec::new()).await
    }

    /// `GET path?query`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn get_with<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = query_pairs(query).map_err(|e| self.reject(e))?;
        self.send(Method::Get, path, None, query).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.encode_body(body)?;
        self.send(Method::Post, path, Some(body), Vec::new()).await
    }

    /// `POST path` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::Post, path, None, Vec::new()).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.encode_body(body)?;
        self.send(Method::Put, path, Some(body), Vec::new()).await
    }

    /// `PUT path` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::Put, path, None, Vec::new()).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::Delete, path, None, Vec::new()).await
    }

    /// `DELETE path` with a JSON body (batch removal).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn delete_with<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.encode_body(body)?;
        self.send(Method::Delete, path, Some(body), Vec::new()).await
    }

    /// Send a request and resolve with the envelope's `data`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_full`].
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        self.send_full(method, path, body, query)
            .await
            .map(|response| response.data)
    }

    /// Send a request and resolve with the unwrapped envelope plus status.
    ///
    /// Absent `data` is decoded from JSON `null`, so `()` and `Option<_>`
    /// results accept it while struct results report a decode error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when no response arrives,
    /// [`ApiError::Application`]/[`ApiError::Unauthorized`] for a failing
    /// envelope, [`ApiError::Status`] for HTTP errors without a usable
    /// envelope, and [`ApiError::Decode`] when `data` has the wrong shape.
    /// Every error has already been toasted when it is returned.
    pub async fn send_full<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        query: Vec<(String, String)>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let request = self.build_request(method, path, body, query);
        tracing::debug!(method = method.as_str(), url = %request.url, "api request");

        let response = match self.backend.execute(request).await {
            Ok(response) => response,
            Err(failure) => {
                tracing::warn!(method = method.as_str(), path, reason = %failure.reason, "api request got no response");
                return Err(self.reject(ApiError::network()));
            }
        };

        let (code, message, data) = unwrap_envelope(&response).map_err(|e| self.reject(e))?;
        let data = serde_json::from_value::<T>(data).map_err(|e| self.reject(ApiError::Decode(e.to_string())))?;
        tracing::debug!(method = method.as_str(), path, status = response.status, "api response");
        Ok(ApiResponse { status: response.status, code, message, data })
    }

    pub(crate) fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        query: Vec<(String, String)>,
    ) -> HttpRequest {
        let mut headers = vec![
            ("Content-Type".to_owned(), "application/json".to_owned()),
            ("Accept".to_owned(), "application/json".to_owned()),
        ];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        HttpRequest { method, url: self.config.url(path), query, headers, body, timeout: self.config.timeout }
    }

    fn encode_body<B: Serialize + ?Sized>(&self, body: &B) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|e| self.reject(ApiError::Encode(e.to_string())))
    }

    /// Apply the side effects of a failed call and hand the error back.
    pub(crate) fn reject(&self, err: ApiError) -> ApiError {
        tracing::warn!(error = %err, "api call failed");
        if err.is_auth_failure() {
            self.session.invalidate();
            self.events.navigate(NavigationIntent::Login);
        }
        self.events.toast(err.message());
        err
    }
}

/// Split a response into `(code, message, data)` or classify its failure.
pub(crate) fn unwrap_envelope(response: &HttpResponse) -> Result<(i32, String, Value), ApiError> {
    if response.is_success() {
        if let Ok(envelope) = serde_json::from_str::<Envelope<Value>>(&response.body) {
            if !envelope.is_success() {
                return Err(ApiError::from_envelope(envelope.code, &envelope.message));
            }
            return Ok((envelope.code, envelope.message, envelope.data.unwrap_or(Value::Null)));
        }
    }
    let message = body_message(&response.body);
    Err(ApiError::from_status(response.status, message.as_deref()))
}

fn body_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    value.get("message")?.as_str().map(str::to_owned)
}

/// Flatten a serializable query struct into ordered `(key, value)` pairs.
/// `None` fields are skipped; sequences are comma-joined.
///
/// # Errors
///
/// Returns [`ApiError::Encode`] if the value does not serialize to an object.
pub fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, ApiError> {
    match serde_json::to_value(query).map_err(|e| ApiError::Encode(e.to_string()))? {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| query_value(value).map(|v| (key, v)))
            .collect()),
        other => Err(ApiError::Encode(format!("query must be an object, got {other}"))),
    }
}

fn query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
