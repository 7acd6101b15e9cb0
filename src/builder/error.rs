//! Build errors for the calculator builder.

use crate::checkpoint::CheckpointError;
use thiserror::Error;

/// Errors that can occur when building a calculator.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Display sink not specified. Call .sink(sink) before .build()")]
    MissingSink,

    #[error("History limit must be at least 1")]
    InvalidHistoryLimit,

    #[error("Cannot resume from checkpoint: {0}")]
    Checkpoint(#[from] CheckpointError),
}
