//! Laboratory reservations, conflict checks and free time slots.

#[cfg(test)]
#[path = "reservation_test.rs"]
mod reservation_test;

use serde::{Deserialize, Serialize};

use super::{ApprovalRequest, SortOrder, action_path, resource_path};
use crate::envelope::Page;
use crate::error::ApiError;
use crate::transport::ApiClient;

const RESOURCE: &str = "reservation";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
    InUse,
}

impl ReservationStatus {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
            Self::Cancelled => 3,
            Self::Completed => 4,
            Self::InUse => 5,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Approved),
            2 => Some(Self::Rejected),
            3 => Some(Self::Cancelled),
            4 => Some(Self::Completed),
            5 => Some(Self::InUse),
            _ => None,
        }
    }

    /// Only pending or approved reservations may be cancelled.
    #[must_use]
    pub fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub laboratory_id: i64,
    #[serde(default)]
    pub laboratory_name: Option<String>,
    #[serde(default)]
    pub laboratory_code: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    /// `YYYY-MM-DD`.
    pub reserve_date: String,
    /// `HH:mm:ss`.
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub purpose: Option<String>,
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
    #[serde(default)]
    pub actual_start_time: Option<String>,
    #[serde(default)]
    pub actual_end_time: Option<String>,
    #[serde(default)]
    pub usage_remark: Option<String>,
    pub create_time: String,
    pub update_time: String,
}

impl Reservation {
    #[must_use]
    pub fn status(&self) -> Option<ReservationStatus> {
        ReservationStatus::from_code(self.status)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub laboratory_id: Option<i64>,
    pub user_id: Option<i64>,
    pub reserve_date: Option<String>,
    pub status: Option<i32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub laboratory_id: i64,
    pub reserve_date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReservation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteReservation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_remark: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheck {
    pub laboratory_id: i64,
    pub reserve_date: String,
    pub start_time: String,
    pub end_time: String,
    /// Reservation to ignore, when re-checking an existing booking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub id: i64,
    pub start_time: String,
    pub end_time: String,
    pub status: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub has_conflict: bool,
    #[serde(default)]
    pub conflict_list: Vec<Conflict>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTime {
    #[serde(default)]
    pub available_time_slots: Vec<TimeSlot>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailableTimeQuery<'a> {
    laboratory_id: i64,
    reserve_date: &'a str,
}

/// `GET /reservation`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn list(api: &ApiClient, query: &ReservationQuery) -> Result<Page<Reservation>, ApiError> {
    api.get_with("/reservation", query).await
}

/// `GET /reservation/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn get(api: &ApiClient, id: i64) -> Result<Reservation, ApiError> {
    api.get(&resource_path(RESOURCE, id)).await
}

/// `POST /reservation`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn create(api: &ApiClient, request: &CreateReservation) -> Result<Reservation, ApiError> {
    api.post("/reservation", request).await
}

/// `PUT /reservation/{id}/cancel`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn cancel(api: &ApiClient, id: i64, request: &CancelReservation) -> Result<Reservation, ApiError> {
    api.put(&action_path(RESOURCE, id, "cancel"), request).await
}

/// `PUT /reservation/{id}/approve`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn approve(api: &ApiClient, id: i64, request: &ApprovalRequest) -> Result<Reservation, ApiError> {
    api.put(&action_path(RESOURCE, id, "approve"), request).await
}

/// `PUT /reservation/{id}/complete`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn complete(api: &ApiClient, id: i64, request: &CompleteReservation) -> Result<Reservation, ApiError> {
    api.put(&action_path(RESOURCE, id, "complete"), request).await
}

/// `POST /reservation/check-conflict`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn check_conflict(api: &ApiClient, request: &ConflictCheck) -> Result<ConflictReport, ApiError> {
    api.post("/reservation/check-conflict", request).await
}

/// `GET /reservation/available-time?laboratoryId=&reserveDate=`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn available_time(api: &ApiClient, laboratory_id: i64, reserve_date: &str) -> Result<AvailableTime, ApiError> {
    api.get_with("/reservation/available-time", &AvailableTimeQuery { laboratory_id, reserve_date })
        .await
}
