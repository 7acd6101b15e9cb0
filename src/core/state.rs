//! Phase trait and the calculator's explicit input phases.
//!
//! A phase is a coarse, serializable label for where the calculator is in
//! its input cycle. It never carries operand text; that lives in
//! [`Registers`](super::Registers).

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine phases.
///
/// All methods are pure - no side effects. Phases are plain values that
/// describe the current position in the input cycle.
///
/// # Required Traits
///
/// - `Clone`: phases are copied into step results and checkpoints
/// - `PartialEq`: phases are compared in transition logic and tests
/// - `Debug`: phases show up in log events
/// - `Serialize` + `Deserialize`: phases are stored in checkpoints
///
/// # Example
///
/// ```rust
/// use keycalc::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Entry {
///     Empty,
///     Typing,
///     Rejected,
/// }
///
/// impl State for Entry {
///     fn name(&self) -> &str {
///         match self {
///             Self::Empty => "Empty",
///             Self::Typing => "Typing",
///             Self::Rejected => "Rejected",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Rejected)
///     }
/// }
///
/// assert_eq!(Entry::Typing.name(), "Typing");
/// assert!(Entry::Rejected.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the phase's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal phase.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this phase represents a failed computation.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

crate::state_enum! {
    /// Where the calculator is in its input cycle.
    ///
    /// No phase is final: the machine runs for the lifetime of the process.
    /// `Errored` is entered when a division by zero put the `"Error"`
    /// sentinel on screen; the next entry leaves it.
    #[derive(Default)]
    pub enum Phase {
        /// Fresh start, after clear-all, or after a computed result.
        #[default]
        Idle,
        /// Digits are being typed into the current operand.
        Accumulating,
        /// An operator was entered and the right operand is still empty.
        OperatorPending,
        /// The last computation was a division by zero.
        Errored,
    }
    error: [Errored]
}
