//! Authentication endpoints and the signed-in user profile.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::ApiClient;

/// Fixed role set assigned by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "admin" => Some(Self::Admin),
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

/// Profile of the signed-in user. Replaced wholesale, never patched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role_code: String,
    /// 1 = enabled, 0 = disabled.
    pub status: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl UserProfile {
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::from_code(&self.role_code)
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role_code == role.code()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.status == 1
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self { username: username.to_owned(), password: password.to_owned() }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_info: UserProfile,
}

/// `POST /auth/login`. `None` when the server succeeds without a payload.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<Option<LoginResponse>, ApiError> {
    api.post("/auth/login", request).await
}

/// `POST /auth/logout`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    api.post_empty("/auth/logout").await
}

/// `GET /auth/me`.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn current_user(api: &ApiClient) -> Result<UserProfile, ApiError> {
    api.get("/auth/me").await
}
