//! Shared error type across tally crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed or missing input.
    InvalidRequest,
    /// Entity is not part of the registered set.
    UnknownEntity,
    /// Backing store could not complete the operation.
    StoreUnavailable,
    /// Invalid or missing configuration.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidRequest => "INVALID_REQUEST",
            ClientCode::UnknownEntity => "UNKNOWN_ENTITY",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TallyError::InvalidRequest(_) => ClientCode::InvalidRequest,
            TallyError::UnknownEntity(_) => ClientCode::UnknownEntity,
            TallyError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            TallyError::Config(_) => ClientCode::Config,
            TallyError::Internal(_) => ClientCode::Internal,
        }
    }
}
