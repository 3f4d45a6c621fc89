//! Error types for the scheduling board.

use thiserror::Error;

use crate::models::SessionId;
use crate::validation::ValidationError;

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

/// Failures surfaced to the board's caller.
///
/// Every variant is recoverable; the store is left in its last-good state.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The bulk read failed. A reload is required.
    #[error("failed to load sessions: {0}")]
    LoadFailed(String),

    /// The fetched record set was refused by validation. A reload is required.
    #[error("fetched sessions failed validation ({} problems)", .0.len())]
    InvalidRecords(Vec<ValidationError>),

    /// `assign` referenced an id not present in the store.
    #[error("unknown session id: {0}")]
    UnknownSession(SessionId),

    /// The external write for an assignment failed.
    #[error("failed to update assignee of session {id}: {reason}")]
    WriteFailed {
        /// Session whose write failed.
        id: SessionId,
        /// Collaborator-reported cause.
        reason: String,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures reported by a [`SessionSource`](crate::source::SessionSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The remote source could not be reached or timed out.
    #[error("session source unavailable: {0}")]
    Unavailable(String),

    /// The remote source refused the request.
    #[error("session source rejected request: {0}")]
    Rejected(String),

    /// The payload could not be decoded.
    #[error("failed to decode session payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML or has an unknown value.
    #[error("failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}
