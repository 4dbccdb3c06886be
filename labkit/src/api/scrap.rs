//! Equipment scrap requests and their approval.

#[cfg(test)]
#[path = "scrap_test.rs"]
mod scrap_test;

use serde::{Deserialize, Serialize};

use super::{ApprovalRequest, SortOrder, action_path, resource_path};
use crate::envelope::Page;
use crate::error::ApiError;
use crate::transport::ApiClient;

const RESOURCE: &str = "scrap";

/// 0 pending, 1 approved, 2 rejected.
pub const SCRAP_PENDING: i32 = 0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scrap {
    pub id: i64,
    pub equipment_id: i64,
    #[serde(default)]
    pub equipment_name: Option<String>,
    #[serde(default)]
    pub equipment_model: Option<String>,
    #[serde(default)]
    pub equipment_asset_code: Option<String>,
    pub applicant_id: i64,
    #[serde(default)]
    pub applicant_name: Option<String>,
    pub apply_date: String,
    pub scrap_reason: String,
    pub status: i32,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub approver_id: Option<i64>,
    #[serde(default)]
    pub approver_name: Option<String>,
    #[serde(default)]
    pub approve_time: Option<String>,
    #[serde(default)]
    pub approve_remark: Option<String>,
    pub create_time: String,
    pub update_time: String,
}

impl Scrap {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == SCRAP_PENDING
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub equipment_id: Option<i64>,
    pub applicant_id: Option<i64>,
    pub status: Option<i32>,
    pub apply_date_start: Option<String>,
    pub apply_date_end: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScrap {
    pub equipment_id: i64,
    pub apply_date: String,
    pub scrap_reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapStatsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapStats {
    pub total_count: u64,
    pub pending_count: u64,
    pub approved_count: u64,
    pub rejected_count: u64,
    pub approval_rate: f64,
}

/// `GET /scrap`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn list(api: &ApiClient, query: &ScrapQuery) -> Result<Page<Scrap>, ApiError> {
    api.get_with("/scrap", query).await
}

/// `GET /scrap/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn get(api: &ApiClient, id: i64) -> Result<Scrap, ApiError> {
    api.get(&resource_path(RESOURCE, id)).await
}

/// `POST /scrap`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn create(api: &ApiClient, request: &CreateScrap) -> Result<Scrap, ApiError> {
    api.post("/scrap", request).await
}

/// `PUT /scrap/{id}/approve`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn approve(api: &ApiClient, id: i64, request: &ApprovalRequest) -> Result<Scrap, ApiError> {
    api.put(&action_path(RESOURCE, id, "approve"), request).await
}

/// `GET /scrap/stats`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn stats(api: &ApiClient, query: &ScrapStatsQuery) -> Result<ScrapStats, ApiError> {
    api.get_with("/scrap/stats", query).await
}
