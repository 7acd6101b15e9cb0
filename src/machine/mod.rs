//! The calculator controller and its display sinks.
//!
//! This module is the shell around the pure core: it sequences register
//! changes, tracks the input phase, records folded operations on the tape,
//! logs each step, and notifies the display sink.

mod calculator;
mod sink;
mod step;

pub use calculator::Calculator;
pub use sink::{DisplaySink, LatestSink, RecordingSink, WriterSink};
pub use step::StepResult;
