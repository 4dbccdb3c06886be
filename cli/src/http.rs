//! `reqwest` implementation of the `labkit` transport backend.
//!
//! ERROR HANDLING
//! ==============
//! Connect failures, timeouts and unreadable bodies become
//! `TransportFailure`. Every HTTP status, 4xx and 5xx included, is handed back
//! as a response so `labkit` classifies it.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use labkit::transport::TransportFailure;
use labkit::{HttpBackend, HttpRequest, HttpResponse, Method};

/// Native HTTP backend. One connection pool per process.
#[derive(Clone, Debug)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// # Errors
    ///
    /// Returns the builder error when the TLS backend cannot initialize.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("labdesk-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_owned()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

#[async_trait::async_trait(?Send)]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), &request.url)
            .query(&request.query)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportFailure::new(describe(&e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportFailure::new(describe(&e)))?;
        Ok(HttpResponse { status, body })
    }
}
