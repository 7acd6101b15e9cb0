//! Keycalc: a keypad calculator built around a small input state machine
//!
//! The calculator keeps the operand being typed and an optional pending
//! operation. Digits accumulate into text, an operator captures the left
//! operand (folding any pending operation first, so entry chains left to
//! right), and compute folds the pending operation into a result.
//!
//! The core registers are plain values with no side effects. The
//! [`Calculator`](machine::Calculator) controller sequences them, tracks an
//! explicit input [`Phase`](core::Phase), records every fold on a tape and
//! notifies a [`DisplaySink`](machine::DisplaySink) after each change.
//!
//! # Core Concepts
//!
//! - **Registers**: the current operand plus an optional pending operation
//! - **Phases**: `Idle`, `Accumulating`, `OperatorPending`, `Errored`
//! - **Sinks**: read-only observers that render the two display lines
//! - **Input**: key presses mapped to the six calculator calls
//!
//! # Example
//!
//! ```rust
//! use keycalc::core::{Operator, Phase};
//! use keycalc::machine::{Calculator, RecordingSink};
//!
//! let mut calc = Calculator::new(RecordingSink::new());
//!
//! calc.append('5');
//! calc.set_operator(Operator::Add);
//! calc.append('3');
//! calc.set_operator(Operator::Add);
//! assert_eq!(calc.previous_operand(), "8");
//!
//! calc.append('2');
//! calc.compute();
//! assert_eq!(calc.current_operand(), "10");
//! assert_eq!(calc.phase(), Phase::Idle);
//!
//! let last = calc.sink().last().unwrap();
//! assert_eq!(last.current, "10");
//! assert_eq!(last.previous, "");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod input;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, CalculatorBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::{Config, ConfigError};
pub use core::{Frame, Operator, Phase, Registers, State};
pub use input::{Action, InputHandler, Key};
pub use machine::{Calculator, DisplaySink, StepResult};
