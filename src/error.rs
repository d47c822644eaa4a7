use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::schemas::ErrorResponse;

/// Error taxonomy for the HTTP API.
///
/// Absent resources and resources owned by another caller both map to
/// [`ApiError::NotFound`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Database(DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "DATABASE_UNAVAILABLE")
            }
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let error = if status.is_server_error() {
            tracing::error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let body = ErrorResponse {
            error,
            code: code.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}
