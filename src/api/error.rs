//! Error types and response handling for the HTTP API.
//!
//! Storage failures are logged in full and answered with a 500 carrying a
//! fixed message; internal detail never reaches the client.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::types::ErrorBody;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Counter operation a request was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOp {
    Read,
    Increment,
    Decrement,
}

impl CounterOp {
    /// Fixed, client-safe message for a failed operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            CounterOp::Read => "Failed to load counter",
            CounterOp::Increment => "Failed to increment counter",
            CounterOp::Decrement => "Failed to decrement counter",
        }
    }
}

impl fmt::Display for CounterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterOp::Read => write!(f, "read"),
            CounterOp::Increment => write!(f, "increment"),
            CounterOp::Decrement => write!(f, "decrement"),
        }
    }
}

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Counter {op} failed: {source}")]
    Storage {
        op: CounterOp,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn storage(op: CounterOp, source: StoreError) -> Self {
        ApiError::Storage { op, source }
    }

    /// Map error variant to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the JSON body
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Storage { op, .. } => op.failure_message(),
        }
    }
}

/// Builder for standardized error responses
pub struct ErrorResponse;

impl ErrorResponse {
    /// Create a JSON error response from an ApiError
    pub fn from_error(err: &ApiError) -> Response {
        let body = ErrorBody {
            error: err.public_message().to_string(),
        };
        (err.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage { op, source } => {
                tracing::error!(%op, error = %source, "Counter operation failed");
            }
        }
        ErrorResponse::from_error(&self)
    }
}

/// Fatal errors from the `serve` startup sequence.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
