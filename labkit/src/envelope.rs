//! Uniform response wrapper returned by every server endpoint.
//!
//! DESIGN
//! ======
//! `code == 200` means `data` is meaningful for the call; any other code means
//! `data` is treated as absent and `message` carries the explanation shown to
//! the user. HTTP status and envelope code are independent: a 200 response can
//! still carry a failing envelope.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope code for a successful call.
pub const SUCCESS_CODE: i32 = 200;
/// Envelope code for an authentication failure.
pub const UNAUTHORIZED_CODE: i32 = 401;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self { code: SUCCESS_CODE, message: "success".to_owned(), data: Some(data) }
    }

    #[must_use]
    pub fn failure(code: i32, message: &str) -> Self {
        Self { code, message: message.to_owned(), data: None }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Paged list payload shared by every list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of pages at the current page size, or 0 when size is unknown.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size))
    }
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
