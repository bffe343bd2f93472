//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use platform::token::TokenError;
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Request payload failed validation
    #[error("{message}: {details}")]
    Validation {
        message: &'static str,
        details: String,
    },

    /// Email already belongs to another account
    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Correct password, deactivated account
    #[error("User account is inactive")]
    AccountInactive,

    /// No Authorization header
    #[error("Authorization header required")]
    MissingAuthorization,

    /// Authorization header is not `Bearer <token>`
    #[error("Invalid authorization header format")]
    MalformedAuthorization,

    /// Token failed validation
    #[error("Invalid token")]
    InvalidToken(#[source] TokenError),

    /// Token subject is missing or deactivated
    #[error("User not found or inactive")]
    AccountUnavailable,

    /// Account not found
    #[error("User not found")]
    NotFound,

    /// Path id is not a number
    #[error("Invalid user ID")]
    InvalidId,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Token could not be issued
    #[error("Token issuing failed: {0}")]
    TokenIssue(#[source] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Validation failure with the standard message
    pub fn invalid(details: impl Into<String>) -> Self {
        AccountError::Validation {
            message: "Invalid request data",
            details: details.into(),
        }
    }

    /// Status sent to the client
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation { .. }
            | AccountError::DuplicateEmail
            | AccountError::InvalidId => ErrorKind::BadRequest,
            AccountError::InvalidCredentials
            | AccountError::AccountInactive
            | AccountError::MissingAuthorization
            | AccountError::MalformedAuthorization
            | AccountError::InvalidToken(_)
            | AccountError::AccountUnavailable => ErrorKind::Unauthorized,
            AccountError::NotFound => ErrorKind::NotFound,
            AccountError::Hashing(_)
            | AccountError::TokenIssue(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Client-facing rendering
    ///
    /// Server-side failures collapse to a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Validation { message, details } => {
                AppError::new(self.kind(), *message).with_details(details.clone())
            }
            AccountError::Hashing(_) => AppError::internal("Failed to process password"),
            AccountError::TokenIssue(_) => AppError::internal("Failed to generate token"),
            AccountError::Database(_) | AccountError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// 5xx at error, rejected logins at warn, the rest at debug
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Hashing(msg) => {
                tracing::error!(message = %msg, "Password hashing error");
            }
            AccountError::TokenIssue(e) => {
                tracing::error!(error = %e, "Token issuing error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::InvalidToken(reason) => {
                tracing::debug!(reason = %reason, "Bearer token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<PasswordPolicyError> for AccountError {
    fn from(err: PasswordPolicyError) -> Self {
        AccountError::invalid(format!("password: {err}"))
    }
}

impl From<PasswordHashError> for AccountError {
    fn from(err: PasswordHashError) -> Self {
        AccountError::Hashing(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AccountError {
    fn from(err: tokio::task::JoinError) -> Self {
        AccountError::Internal(format!("Blocking task failed: {err}"))
    }
}
