//! User administration and the role catalogue.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BatchDeleteRequest, SortOrder, action_path, resource_path};
use crate::envelope::Page;
use crate::error::ApiError;
use crate::transport::ApiClient;

const RESOURCE: &str = "users";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role_code: String,
    pub status: i32,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub role_code: Option<String>,
    pub status: Option<i32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub role_code: String,
    /// Defaults to enabled on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

impl fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("role_code", &self.role_code)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePassword {
    /// Required when users change their own password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    pub new_password: String,
}

impl fmt::Debug for UpdatePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UpdatePassword { .. }")
    }
}

/// `GET /users`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn list(api: &ApiClient, query: &UserQuery) -> Result<Page<User>, ApiError> {
    api.get_with("/users", query).await
}

/// `GET /users/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn get(api: &ApiClient, id: i64) -> Result<User, ApiError> {
    api.get(&resource_path(RESOURCE, id)).await
}

/// `POST /users`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn create(api: &ApiClient, request: &CreateUser) -> Result<User, ApiError> {
    api.post("/users", request).await
}

/// `PUT /users/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn update(api: &ApiClient, id: i64, request: &UpdateUser) -> Result<User, ApiError> {
    api.put(&resource_path(RESOURCE, id), request).await
}

/// `DELETE /users/{id}`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn delete(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&resource_path(RESOURCE, id)).await
}

/// `PUT /users/{id}/password`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn update_password(api: &ApiClient, id: i64, request: &UpdatePassword) -> Result<(), ApiError> {
    api.put(&action_path(RESOURCE, id, "password"), request).await
}

/// `DELETE /users/batch`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn delete_batch(api: &ApiClient, request: &BatchDeleteRequest) -> Result<(), ApiError> {
    api.delete_with("/users/batch", request).await
}

/// `GET /roles`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn roles(api: &ApiClient) -> Result<Vec<RoleInfo>, ApiError> {
    api.get("/roles").await
}
