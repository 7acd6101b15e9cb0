//! Builder for constructing calculators.

use crate::builder::error::BuildError;
use crate::checkpoint::Checkpoint;
use crate::core::{Phase, Registers, Tape, DEFAULT_TAPE_LIMIT};
use crate::machine::{Calculator, DisplaySink};

/// Builder for constructing calculators with a fluent API.
///
/// # Example
///
/// ```rust
/// use keycalc::builder::CalculatorBuilder;
/// use keycalc::machine::LatestSink;
///
/// let calc = CalculatorBuilder::new()
///     .sink(LatestSink::new())
///     .history_limit(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(calc.current_operand(), "0");
/// assert_eq!(calc.tape().limit(), 10);
/// ```
pub struct CalculatorBuilder<D: DisplaySink> {
    sink: Option<D>,
    history_limit: Option<usize>,
    checkpoint: Option<Checkpoint>,
}

impl<D: DisplaySink> CalculatorBuilder<D> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            sink: None,
            history_limit: None,
            checkpoint: None,
        }
    }

    /// Set the display sink (required).
    pub fn sink(mut self, sink: D) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set how many calculations the tape keeps.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Resume registers, phase and tape from a checkpoint.
    ///
    /// An explicit [`history_limit`](Self::history_limit) still applies to
    /// the resumed tape.
    pub fn resume(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Build the calculator.
    /// Returns an error if the sink is missing or the settings are invalid.
    pub fn build(self) -> Result<Calculator<D>, BuildError> {
        let sink = self.sink.ok_or(BuildError::MissingSink)?;

        if self.history_limit == Some(0) {
            return Err(BuildError::InvalidHistoryLimit);
        }

        let (registers, phase, tape) = match self.checkpoint {
            Some(checkpoint) => {
                checkpoint.validate()?;
                tracing::debug!(id = %checkpoint.id, "resuming from checkpoint");
                (checkpoint.registers, checkpoint.phase, checkpoint.tape)
            }
            None => (
                Registers::new(),
                Phase::Idle,
                Tape::with_limit(DEFAULT_TAPE_LIMIT),
            ),
        };

        let tape = match self.history_limit {
            Some(limit) => tape.relimited(limit),
            None => tape,
        };

        Ok(Calculator::from_parts(registers, phase, tape, sink))
    }
}

impl<D: DisplaySink> Default for CalculatorBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
