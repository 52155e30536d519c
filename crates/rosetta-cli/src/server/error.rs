//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rosetta::{RosettaError, TableFailure};
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// A blocking worker panicked or was cancelled.
    Internal(String),
    /// Error from the rosetta library.
    Rosetta(RosettaError),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_tables: Option<Vec<TableFailure>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let failed_tables = match &self {
            ApiError::Rosetta(RosettaError::NoTablesProcessed(failures)) => Some(failures.clone()),
            _ => None,
        };
        tracing::warn!(error = %self, "request failed");

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
                failed_tables,
            }),
        )
            .into_response()
    }
}

impl From<RosettaError> for ApiError {
    fn from(err: RosettaError) -> Self {
        ApiError::Rosetta(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Rosetta(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}
