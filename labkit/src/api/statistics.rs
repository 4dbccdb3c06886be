//! Dashboard statistics and due-date reminders.

#[cfg(test)]
#[path = "statistics_test.rs"]
mod statistics_test;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::ApiClient;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentUsage {
    pub equipment_id: i64,
    pub equipment_name: String,
    pub equipment_model: String,
    pub asset_code: Option<String>,
    pub usage_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentUsageStats {
    #[serde(default)]
    pub equipment_list: Vec<EquipmentUsage>,
    pub total_equipment_count: u64,
    pub total_usage_count: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowStats {
    pub total_borrow_count: u64,
    pub pending_count: u64,
    pub approved_count: u64,
    pub borrowed_count: u64,
    pub returned_count: u64,
    pub overdue_count: u64,
    pub rejected_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowReminder {
    pub id: i64,
    pub equipment_name: String,
    pub plan_return_date: String,
    /// Negative once overdue.
    pub remaining_days: i64,
    pub is_overdue: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationReminder {
    pub id: i64,
    pub laboratory_name: String,
    pub reserve_date: String,
    pub start_time: String,
    pub end_time: String,
    pub remaining_days: i64,
    pub is_expired: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub has_reminder: bool,
    pub reminder_count: u64,
    #[serde(default)]
    pub borrow_reminders: Vec<BorrowReminder>,
    #[serde(default)]
    pub reservation_reminders: Vec<ReservationReminder>,
}

/// `GET /statistics/equipment-usage`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn equipment_usage(api: &ApiClient) -> Result<EquipmentUsageStats, ApiError> {
    api.get("/statistics/equipment-usage").await
}

/// `GET /statistics/borrow-stats`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn borrow_stats(api: &ApiClient) -> Result<BorrowStats, ApiError> {
    api.get("/statistics/borrow-stats").await
}

/// `GET /statistics/reminders`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn reminders(api: &ApiClient) -> Result<Reminders, ApiError> {
    api.get("/statistics/reminders").await
}
