//! `gloo-net` implementation of the `labkit` transport backend.
//!
//! Client-side (csr): real HTTP calls raced against a `gloo-timers` sleep.
//! Native builds (tests, tooling): every exchange fails as a transport
//! failure, since fetch only exists in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Only "no response" conditions become `TransportFailure`: fetch errors,
//! unreadable bodies and timeouts. Any HTTP status is returned as a response
//! so `labkit` can classify it.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use labkit::transport::TransportFailure;
use labkit::{HttpBackend, HttpRequest, HttpResponse};

#[cfg(any(test, feature = "csr"))]
fn timeout_message(millis: u128) -> String {
    format!("request timed out after {millis} ms")
}

/// Browser fetch backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserBackend;

#[async_trait::async_trait(?Send)]
impl HttpBackend for BrowserBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        #[cfg(feature = "csr")]
        {
            use futures::future::{Either, select};

            let timeout = request.timeout;
            let exchange = Box::pin(fetch(request));
            let expiry = Box::pin(gloo_timers::future::sleep(timeout));
            match select(exchange, expiry).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(TransportFailure::new(timeout_message(timeout.as_millis()))),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportFailure::new("browser transport unavailable"))
        }
    }
}

#[cfg(feature = "csr")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
    use gloo_net::http::{Method, RequestBuilder};

    let method = match request.method {
        labkit::Method::Get => Method::GET,
        labkit::Method::Post => Method::POST,
        labkit::Method::Put => Method::PUT,
        labkit::Method::Delete => Method::DELETE,
    };
    let mut builder = RequestBuilder::new(&request.full_url()).method(method);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let built = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|e| TransportFailure::new(e.to_string()))?;

    let response = built.send().await.map_err(|e| TransportFailure::new(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| TransportFailure::new(e.to_string()))?;
    Ok(HttpResponse { status, body })
}
