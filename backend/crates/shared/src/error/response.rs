//! HTTP rendering of [`AppError`] (feature `axum`)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::app_error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match self.public_details() {
            Some(details) => json!({ "error": self.message(), "details": details }),
            None => json!({ "error": self.message() }),
        };

        (status, Json(body)).into_response()
    }
}
