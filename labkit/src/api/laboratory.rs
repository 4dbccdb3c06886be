//! Laboratories and the equipment they hold.

#[cfg(test)]
#[path = "laboratory_test.rs"]
mod laboratory_test;

use serde::{Deserialize, Serialize};

use super::equipment::Equipment;
use super::{BatchDeleteRequest, SortOrder, action_path, resource_path};
use crate::envelope::Page;
use crate::error::ApiError;
use crate::transport::ApiClient;

const RESOURCE: &str = "laboratory";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub location: String,
    pub capacity: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// 1 = open, 0 = closed.
    pub status: i32,
    pub manager_id: Option<i64>,
    pub manager_name: Option<String>,
    pub description: Option<String>,
    pub create_time: String,
    pub update_time: String,
    /// Present on the detail endpoint only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_count: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaboratoryQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<i32>,
    pub manager_id: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaboratoryEquipmentQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub status_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLaboratory {
    pub name: String,
    pub code: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLaboratory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLaboratoryStatus {
    pub status: i32,
}

/// `GET /laboratory`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn list(api: &ApiClient, query: &LaboratoryQuery) -> Result<Page<Laboratory>, ApiError> {
    api.get_with("/laboratory", query).await
}

/// `GET /laboratory/{id}`; includes `equipment_count`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn get(api: &ApiClient, id: i64) -> Result<Laboratory, ApiError> {
    api.get(&resource_path(RESOURCE, id)).await
}

/// `POST /laboratory`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn create(api: &ApiClient, request: &CreateLaboratory) -> Result<Laboratory, ApiError> {
    api.post("/laboratory", request).await
}

/// `PUT /laboratory/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn update(api: &ApiClient, id: i64, request: &UpdateLaboratory) -> Result<Laboratory, ApiError> {
    api.put(&resource_path(RESOURCE, id), request).await
}

/// `DELETE /laboratory/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn delete(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&resource_path(RESOURCE, id)).await
}

/// `DELETE /laboratory/batch`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn delete_batch(api: &ApiClient, request: &BatchDeleteRequest) -> Result<(), ApiError> {
    api.delete_with("/laboratory/batch", request).await
}

/// `PUT /laboratory/{id}/status`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn update_status(api: &ApiClient, id: i64, status: i32) -> Result<Laboratory, ApiError> {
    api.put(&action_path(RESOURCE, id, "status"), &UpdateLaboratoryStatus { status }).await
}

/// `GET /laboratory/{id}/equipment`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn equipment(
    api: &ApiClient,
    id: i64,
    query: &LaboratoryEquipmentQuery,
) -> Result<Page<Equipment>, ApiError> {
    api.get_with(&action_path(RESOURCE, id, "equipment"), query).await
}
