//! Typed bindings for every REST resource.
//!
//! Each submodule mirrors one server resource: wire types in camelCase, a
//! `Default` query struct per list endpoint, and free `async fn`s that take
//! the shared [`ApiClient`](crate::ApiClient). Failures are already toasted by
//! the transport when these functions return.


pub mod ai;
pub mod auth;
pub mod borrow;
pub mod equipment;
pub mod laboratory;
pub mod repair;
pub mod reservation;
pub mod scrap;
pub mod statistics;
pub mod user;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Body of the `DELETE /<resource>/batch` endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDeleteRequest {
    pub ids: Vec<i64>,
}

impl BatchDeleteRequest {
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self { ids: ids.into_iter().collect() }
    }
}

/// Outcome of an approval step (borrow, reservation, scrap). Sent as the
/// integer status `1` or `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl ApprovalDecision {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Approve => 1,
            Self::Reject => 2,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Approve),
            2 => Some(Self::Reject),
            _ => None,
        }
    }
}

impl Serialize for ApprovalDecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for ApprovalDecision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        Self::from_code(code).ok_or_else(|| serde::de::Error::custom(format!("unknown approval status {code}")))
    }
}

/// Body shared by the three approval endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub status: ApprovalDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl ApprovalRequest {
    #[must_use]
    pub fn approve() -> Self {
        Self { status: ApprovalDecision::Approve, remark: None }
    }

    #[must_use]
    pub fn reject(remark: &str) -> Self {
        Self { status: ApprovalDecision::Reject, remark: Some(remark.to_owned()) }
    }

    #[must_use]
    pub fn with_remark(mut self, remark: &str) -> Self {
        self.remark = Some(remark.to_owned());
        self
    }
}

/// Sort direction accepted by every list endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

pub(crate) fn resource_path(resource: &str, id: i64) -> String {
    format!("/{resource}/{id}")
}

pub(crate) fn action_path(resource: &str, id: i64, action: &str) -> String {
    format!("/{resource}/{id}/{action}")
}
