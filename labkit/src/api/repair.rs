//! Fault reports and repair progress.

#[cfg(test)]
#[path = "repair_test.rs"]
mod repair_test;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{SortOrder, action_path, resource_path};
use crate::envelope::Page;
use crate::error::ApiError;
use crate::transport::ApiClient;

const RESOURCE: &str = "repair";

/// Repair progress. Sent and received as its integer code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RepairStatus {
    Pending,
    Repairing,
    Fixed,
    Unrepairable,
}

impl RepairStatus {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Repairing => 1,
            Self::Fixed => 2,
            Self::Unrepairable => 3,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Repairing),
            2 => Some(Self::Fixed),
            3 => Some(Self::Unrepairable),
            _ => None,
        }
    }

    /// Fixed and unrepairable are terminal.
    #[must_use]
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Fixed | Self::Unrepairable)
    }
}

impl Serialize for RepairStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for RepairStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i32::deserialize(deserializer)?;
        Self::from_code(code).ok_or_else(|| serde::de::Error::custom(format!("unknown repair status {code}")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repair {
    pub id: i64,
    pub equipment_id: i64,
    #[serde(default)]
    pub equipment_name: Option<String>,
    #[serde(default)]
    pub equipment_model: Option<String>,
    #[serde(default)]
    pub equipment_asset_code: Option<String>,
    pub reporter_id: i64,
    #[serde(default)]
    pub reporter_name: Option<String>,
    pub report_date: String,
    pub fault_description: String,
    #[serde(default)]
    pub repair_result: Option<String>,
    #[serde(default)]
    pub repair_date: Option<String>,
    pub status: RepairStatus,
    #[serde(default)]
    pub status_name: Option<String>,
    pub create_time: String,
    pub update_time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub equipment_id: Option<i64>,
    pub reporter_id: Option<i64>,
    pub status: Option<RepairStatus>,
    pub report_date_start: Option<String>,
    pub report_date_end: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepair {
    pub equipment_id: i64,
    pub report_date: String,
    pub fault_description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRepairStatus {
    pub status: RepairStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_date: Option<String>,
}

impl UpdateRepairStatus {
    #[must_use]
    pub fn new(status: RepairStatus) -> Self {
        Self { status, repair_result: None, repair_date: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairStatsQuery {
    pub equipment_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairStats {
    pub total_count: u64,
    pub pending_count: u64,
    pub repairing_count: u64,
    pub fixed_count: u64,
    pub unrepairable_count: u64,
    pub repair_rate: f64,
}

/// `GET /repair`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn list(api: &ApiClient, query: &RepairQuery) -> Result<Page<Repair>, ApiError> {
    api.get_with("/repair", query).await
}

/// `GET /repair/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn get(api: &ApiClient, id: i64) -> Result<Repair, ApiError> {
    api.get(&resource_path(RESOURCE, id)).await
}

/// `POST /repair`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn create(api: &ApiClient, request: &CreateRepair) -> Result<Repair, ApiError> {
    api.post("/repair", request).await
}

/// `PUT /repair/{id}/status`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn update_status(api: &ApiClient, id: i64, request: &UpdateRepairStatus) -> Result<Repair, ApiError> {
    api.put(&action_path(RESOURCE, id, "status"), request).await
}

/// `GET /repair/stats`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn stats(api: &ApiClient, query: &RepairStatsQuery) -> Result<RepairStats, ApiError> {
    api.get_with("/repair/stats", query).await
}
