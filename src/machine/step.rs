//! Outcome of a single calculator operation.

use crate::core::{NoOp, Phase};

/// Result of executing one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The registers changed and the display was refreshed.
    Changed { from: Phase, to: Phase },

    /// Nothing changed; the display was not refreshed.
    Ignored(NoOp),
}

impl StepResult {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Why the step was ignored, if it was.
    pub fn no_op(&self) -> Option<NoOp> {
        match self {
            Self::Ignored(reason) => Some(*reason),
            Self::Changed { .. } => None,
        }
    }
}
