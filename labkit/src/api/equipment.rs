//! Equipment inventory: CRUD, status transitions and the status catalogue.

#[cfg(test)]
#[path = "equipment_test.rs"]
mod equipment_test;

use serde::{Deserialize, Serialize};

use super::{BatchDeleteRequest, SortOrder, action_path, resource_path};
use crate::envelope::Page;
use crate::error::ApiError;
use crate::transport::ApiClient;

const RESOURCE: &str = "equipment";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub specification: Option<String>,
    pub asset_code: Option<String>,
    pub unit_price: f64,
    pub quantity: u32,
    pub supplier: Option<String>,
    pub purchase_date: String,
    pub warranty_period: Option<u32>,
    pub status_id: i64,
    pub status_name: String,
    pub status_code: String,
    pub laboratory_id: i64,
    pub laboratory_name: String,
    pub description: Option<String>,
    pub create_time: String,
    pub update_time: String,
}

/// One entry of the equipment status catalogue (`normal`, `repairing`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentStatus {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub specification: Option<String>,
    pub asset_code: Option<String>,
    pub supplier: Option<String>,
    pub status_code: Option<String>,
    pub laboratory_id: Option<i64>,
    pub purchase_date_start: Option<String>,
    pub purchase_date_end: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    pub name: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_code: Option<String>,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub purchase_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_period: Option<u32>,
    pub status_id: i64,
    pub laboratory_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update; `None` fields are left unchanged by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laboratory_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentStatus {
    pub status_id: i64,
}

/// `GET /equipment`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn list(api: &ApiClient, query: &EquipmentQuery) -> Result<Page<Equipment>, ApiError> {
    api.get_with("/equipment", query).await
}

/// `GET /equipment/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn get(api: &ApiClient, id: i64) -> Result<Equipment, ApiError> {
    api.get(&resource_path(RESOURCE, id)).await
}

/// `POST /equipment`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn create(api: &ApiClient, request: &CreateEquipment) -> Result<Equipment, ApiError> {
    api.post("/equipment", request).await
}

/// `PUT /equipment/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn update(api: &ApiClient, id: i64, request: &UpdateEquipment) -> Result<Equipment, ApiError> {
    api.put(&resource_path(RESOURCE, id), request).await
}

/// `DELETE /equipment/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn delete(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&resource_path(RESOURCE, id)).await
}

/// `DELETE /equipment/batch`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn delete_batch(api: &ApiClient, request: &BatchDeleteRequest) -> Result<(), ApiError> {
    api.delete_with("/equipment/batch", request).await
}

/// `PUT /equipment/{id}/status`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn update_status(api: &ApiClient, id: i64, status_id: i64) -> Result<Equipment, ApiError> {
    api.put(&action_path(RESOURCE, id, "status"), &UpdateEquipmentStatus { status_id }).await
}

/// `GET /equipment/status`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn statuses(api: &ApiClient) -> Result<Vec<EquipmentStatus>, ApiError> {
    api.get("/equipment/status").await
}
