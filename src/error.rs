//! Error types for the admin API
//!
//! Cache operations themselves never fail; the only HTTP-level error is a
//! lookup of a cache that is not registered.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// No cache with that name
    #[error("Not found: {0}")]
    NotFound(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
