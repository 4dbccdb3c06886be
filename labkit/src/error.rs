//! Error taxonomy for API calls.
//!
//! ERROR HANDLING
//! ==============
//! Four failure classes reach callers: application errors carried in a
//! non-success envelope, authentication failures, HTTP status errors without a
//! usable envelope, and network failures where no response arrived. Failures
//! on the client side itself (bad payloads, storage) complete the set. Each
//! carries the user-facing message the transport already surfaced as a toast,
//! so callers may add local handling without re-deriving text.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::envelope::UNAUTHORIZED_CODE;
use crate::session::StorageError;

pub const GENERIC_FAILURE_MESSAGE: &str = "request failed";
pub const NETWORK_ERROR_MESSAGE: &str = "network error, please check your connection";
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized, please log in again";
pub const FORBIDDEN_MESSAGE: &str = "access denied";
pub const NOT_FOUND_MESSAGE: &str = "resource not found";
pub const SERVER_ERROR_MESSAGE: &str = "internal server error";
pub const SIGNED_OUT_MESSAGE: &str = "signed out, please log in again";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with an envelope whose code is not the success code.
    #[error("{message}")]
    Application { code: i32, message: String },

    /// Envelope code 401 or HTTP 401; the session has been invalidated.
    #[error("{message}")]
    Unauthorized { message: String },

    /// An HTTP error status without a usable envelope.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No response was received (unreachable host, timeout).
    #[error("{message}")]
    Network { message: String },

    /// The request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// The envelope succeeded but `data` did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The call succeeded but its result could not be persisted locally.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The session ended while the call was in flight; the result was discarded.
    #[error("signed out before the result could be applied")]
    SignedOut,
}

impl ApiError {
    /// Classify a non-success envelope.
    #[must_use]
    pub fn from_envelope(code: i32, message: &str) -> Self {
        let message = non_empty_or_generic(message);
        if code == UNAUTHORIZED_CODE {
            Self::Unauthorized { message }
        } else {
            Self::Application { code, message }
        }
    }

    /// Classify an HTTP failure from its status, using the body's `message`
    /// field only when the status has no fixed text.
    #[must_use]
    pub fn from_status(status: u16, body_message: Option<&str>) -> Self {
        let fixed = match status {
            401 => return Self::Unauthorized { message: UNAUTHORIZED_MESSAGE.to_owned() },
            403 => Some(FORBIDDEN_MESSAGE),
            404 => Some(NOT_FOUND_MESSAGE),
            500 => Some(SERVER_ERROR_MESSAGE),
            _ => None,
        };
        let message = match fixed {
            Some(text) => text.to_owned(),
            None => non_empty_or_generic(body_message.unwrap_or_default()),
        };
        Self::Status { status, message }
    }

    #[must_use]
    pub fn network() -> Self {
        Self::Network { message: NETWORK_ERROR_MESSAGE.to_owned() }
    }

    /// User-facing text for this failure.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Application { message, .. }
            | Self::Unauthorized { message }
            | Self::Status { message, .. }
            | Self::Network { message } => message,
            Self::Encode(_) | Self::Decode(_) | Self::Storage(_) => GENERIC_FAILURE_MESSAGE,
            Self::SignedOut => SIGNED_OUT_MESSAGE,
        }
    }

    /// Whether this failure invalidates the session.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

fn non_empty_or_generic(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() { GENERIC_FAILURE_MESSAGE.to_owned() } else { trimmed.to_owned() }
}
