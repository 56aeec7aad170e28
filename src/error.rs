//! Error types for the key-value server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == KV Error Enum ==
/// Unified error type for the store, the list registry and the transport.
///
/// Most variants are ordinary outcomes rather than failures: none of them
/// leaves the store or the registry in an inconsistent state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KvError {
    /// Key was never set, or has been removed
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key exists but its TTL has lapsed
    #[error("Key has expired: {0}")]
    Expired(String),

    /// Pop found no element to remove
    #[error("List is empty: {0}")]
    Empty(String),

    /// Blocking pop reached its deadline without receiving an element
    #[error("Timed out waiting on list: {0}")]
    TimedOut(String),

    /// Argument rejected by the store or the registry
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Command text could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for KvError {
    fn into_response(self) -> Response {
        let status = match &self {
            KvError::NotFound(_) | KvError::Expired(_) => StatusCode::NOT_FOUND,
            KvError::Empty(_) | KvError::InvalidArgument(_) | KvError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            KvError::TimedOut(_) => StatusCode::REQUEST_TIMEOUT,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the server.
pub type Result<T> = std::result::Result<T, KvError>;
