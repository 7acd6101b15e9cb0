//! Builder API for ergonomic calculator construction.
//!
//! This module provides a fluent builder for wiring a calculator to its
//! display sink, tape size and an optional checkpoint to resume from, plus
//! the `state_enum!` macro used to declare phase enums.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::CalculatorBuilder;
