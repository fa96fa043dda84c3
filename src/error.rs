//! Error types for the availability server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Stable numeric error codes returned to API consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    NoSuchData = 20,
    BadValue = 18,
    ConfigInvalid = 30,
    InvalidRange = 31,
    RangeTooLarge = 32,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A configuration record violates its own invariants.
    /// The administrator has to fix the record; callers must not retry.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Invalid range: {to} is before {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Range too large: {requested} days requested, at most {max_days} allowed")]
    RangeTooLarge { requested: i64, max_days: u32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::ConfigInvalid(msg) => {
                tracing::warn!("Configuration rejected during resolution: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorCode::ConfigInvalid,
                    msg.clone(),
                )
            }
            AppError::InvalidRange { .. } => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidRange, self.to_string())
            }
            AppError::RangeTooLarge { .. } => {
                (StatusCode::BAD_REQUEST, ErrorCode::RangeTooLarge, self.to_string())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
