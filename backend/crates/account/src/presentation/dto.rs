//! API DTOs (Data Transfer Objects)

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use kernel::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::entity::account::Account;
use crate::error::AccountError;

// ============================================================================
// Extractor
// ============================================================================

/// `axum::Json` with rejections rendered as account validation errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AccountError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AccountError {
    fn from(rejection: JsonRejection) -> Self {
        AccountError::invalid(rejection.body_text())
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Register / create user request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub age: Option<i64>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub is_active: Option<bool>,
}

/// List query. Raw strings so bad values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of an account. Never carries the password digest.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for UserView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.value(),
            name: account.name.as_str().to_string(),
            email: account.email.as_str().to_string(),
            age: account.age.map(|a| a.value()),
            is_active: account.is_active(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Register / login response
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserView,
    pub token: String,
}

/// Single-user mutation response
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub message: &'static str,
    pub user: UserView,
}

/// Paginated list response
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub data: Vec<UserView>,
    pub pagination: Pagination,
}
