//! Core error types for deskmate-core.
//!
//! Store and bridge operations share one taxonomy. Engine operations have
//! no failure conditions and return nothing fallible.

use thiserror::Error;

/// Errors surfaced by bridge calls and store mutations.
///
/// A failed call never leaves a partial change behind: the store cache
/// stays at its last backend-confirmed state and the caller decides how
/// to present the failure. There is no automatic retry.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The backend could not be reached or failed mid-call.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The mutation targeted an id the backend does not recognize.
    #[error("no entity with id '{id}'")]
    NotFound { id: String },

    /// The request was rejected before reaching the backend.
    #[error("invalid input for '{field}': {message}")]
    InvalidInput { field: &'static str, message: String },
}

impl BridgeError {
    pub fn not_found(id: impl Into<String>) -> Self {
        BridgeError::NotFound { id: id.into() }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::BackendUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::BackendUnavailable(err.to_string())
    }
}

/// Result type alias for BridgeError
pub type Result<T, E = BridgeError> = std::result::Result<T, E>;
