//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a session checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// JSON encoding or decoding failed
    #[error("JSON checkpoint error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding or decoding failed
    #[error("binary checkpoint error: {0}")]
    Binary(#[from] bincode::Error),

    /// Checkpoint was written by an incompatible format version
    #[error("unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint decoded but describes an impossible calculator state
    #[error("checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
