//! Equipment borrow requests: apply, approve, pick up, return, overdue sweep.

#[cfg(test)]
#[path = "borrow_test.rs"]
mod borrow_test;

use serde::{Deserialize, Serialize};

use super::{ApprovalRequest, SortOrder, action_path};
use crate::envelope::Page;
use crate::error::ApiError;
use crate::transport::ApiClient;

const RESOURCE: &str = "borrow";

/// Borrow lifecycle as reported by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorrowStatus {
    Pending,
    Approved,
    Rejected,
    Borrowed,
    Returned,
    Overdue,
}

impl BorrowStatus {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
            Self::Borrowed => 3,
            Self::Returned => 4,
            Self::Overdue => 5,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Approved),
            2 => Some(Self::Rejected),
            3 => Some(Self::Borrowed),
            4 => Some(Self::Returned),
            5 => Some(Self::Overdue),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub id: i64,
    pub equipment_id: i64,
    #[serde(default)]
    pub equipment_name: Option<String>,
    #[serde(default)]
    pub equipment_model: Option<String>,
    #[serde(default)]
    pub equipment_asset_code: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_department: Option<String>,
    pub borrow_date: String,
    pub plan_return_date: String,
    #[serde(default)]
    pub actual_return_date: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    pub quantity: u32,
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

impl Borrow {
    #[must_use]
    pub fn status(&self) -> Option<BorrowStatus> {
        BorrowStatus::from_code(self.status)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub equipment_id: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<i32>,
    pub borrow_date_start: Option<String>,
    pub borrow_date_end: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrow {
    pub equipment_id: i64,
    pub borrow_date: String,
    pub plan_return_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBorrow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrow_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBorrow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_return_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkOverdueResult {
    pub overdue_count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableQuantity {
    pub equipment_id: i64,
    pub total_quantity: u32,
    pub borrowed_quantity: u32,
    pub available_quantity: u32,
}

/// `GET /borrow`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn list(api: &ApiClient, query: &BorrowQuery) -> Result<Page<Borrow>, ApiError> {
    api.get_with("/borrow", query).await
}

/// `POST /borrow`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn create(api: &ApiClient, request: &CreateBorrow) -> Result<Borrow, ApiError> {
    api.post("/borrow", request).await
}

/// `PUT /borrow/{id}/approve`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn approve(api: &ApiClient, id: i64, request: &ApprovalRequest) -> Result<Borrow, ApiError> {
    api.put(&action_path(RESOURCE, id, "approve"), request).await
}

/// `PUT /borrow/{id}/borrow`: the approved equipment was picked up.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn confirm(api: &ApiClient, id: i64, request: &ConfirmBorrow) -> Result<Borrow, ApiError> {
    api.put(&action_path(RESOURCE, id, "borrow"), request).await
}

/// `PUT /borrow/{id}/return`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn return_equipment(api: &ApiClient, id: i64, request: &ReturnBorrow) -> Result<Borrow, ApiError> {
    api.put(&action_path(RESOURCE, id, "return"), request).await
}

/// `PUT /borrow/mark-overdue`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn mark_overdue(api: &ApiClient) -> Result<MarkOverdueResult, ApiError> {
    api.put_empty("/borrow/mark-overdue").await
}

/// `GET /borrow/available-quantity/{equipment_id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn available_quantity(api: &ApiClient, equipment_id: i64) -> Result<AvailableQuantity, ApiError> {
    api.get(&format!("/borrow/available-quantity/{equipment_id}")).await
}
