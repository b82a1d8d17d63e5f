//! Error types for the news backend
//!
//! Provides unified error handling using thiserror. Every handler funnels
//! into `ApiError`, which maps onto an HTTP status and a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Api Error Enum ==
/// Unified error type for the news backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request failed validation
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Missing or unusable credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream news provider reported a non-ok status
    #[error("Upstream provider error: {0}")]
    Upstream(String),

    /// Upstream transport failure
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Database failure
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("serialization failure: {err}"))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Http(_) => StatusCode::BAD_GATEWAY,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the news backend.
pub type Result<T> = std::result::Result<T, ApiError>;
