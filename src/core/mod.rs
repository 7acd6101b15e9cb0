//! Core calculator types and logic.
//!
//! This module contains the pure core of the calculator:
//! - Operand registers and the operator fold
//! - Lenient numeral parsing and result formatting
//! - Explicit input phases via the `State` trait
//! - The calculation tape
//!
//! Nothing in this module logs or renders; that is the machine's job.

mod history;
mod number;
mod registers;
mod state;

pub use history::{Calculation, Tape, DEFAULT_TAPE_LIMIT};
pub use number::{format_number, is_operand_text, parse_operand, ERROR_SENTINEL};
pub use registers::{Fold, Frame, NoOp, Operator, PendingOperation, Registers};
pub use state::{Phase, State};
