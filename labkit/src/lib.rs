//! Client core for the LabDesk laboratory equipment management API.
//!
//! This crate is UI-framework agnostic so both the browser `client` and the
//! native `cli` consume it directly. It owns the response envelope, the
//! authenticated request pipeline, the persisted session, the route table with
//! its navigation guard, and typed bindings for every resource endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! Business rules (approvals, conflict checks, overdue marking) run on the
//! server. Everything here issues requests, unwraps envelopes and keeps the
//! local session consistent with what the server reports.

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod routes;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::ClientConfig;
pub use envelope::{Envelope, Page};
pub use error::ApiError;
pub use session::{KeyValueStore, MemoryStore, SessionState, SessionStore, StorageError};
pub use transport::{ApiClient, EventSink, HttpBackend, HttpRequest, HttpResponse, Method, NavigationIntent};
