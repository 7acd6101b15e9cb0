//! Operand registers and the arithmetic they fold.
//!
//! `Registers` is the calculator's entire data model: the operand being
//! typed, and an optional pending operation made of the left operand and
//! its operator. Keeping the left operand and operator in one `Option`
//! means one can never be set without the other.

use super::number::{format_number, parse_operand, ERROR_SENTINEL};
use crate::input::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The key symbol for this operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Apply the operator. Returns `None` for a division by exactly zero.
    pub fn apply(self, left: f64, right: f64) -> Option<f64> {
        match self {
            Self::Add => Some(left + right),
            Self::Subtract => Some(left - right),
            Self::Multiply => Some(left * right),
            Self::Divide if right == 0.0 => None,
            Self::Divide => Some(left / right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Operator {
    type Error = InputError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '*' => Ok(Self::Multiply),
            '/' => Ok(Self::Divide),
            other => Err(InputError::UnknownOperator(other.to_string())),
        }
    }
}

impl FromStr for Operator {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Self::try_from(symbol),
            _ => Err(InputError::UnknownOperator(s.to_string())),
        }
    }
}

/// Left operand and operator captured by operator entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub operand: String,
    pub operator: Operator,
}

/// Why a step left the registers untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NoOp {
    #[error("operand already contains a decimal point")]
    DuplicateDecimal,

    #[error("operand is already 0")]
    NothingToDelete,

    #[error("current operand is empty")]
    EmptyOperand,

    #[error("operand is not a number")]
    NotAnOperand,

    #[error("no operation is pending")]
    NothingPending,

    #[error("token is not a digit or decimal point")]
    InvalidToken,

    #[error("key is not mapped to an action")]
    UnmappedKey,
}

/// A folded operation, as recorded on the tape.
#[derive(Clone, Debug, PartialEq)]
pub struct Fold {
    pub left: String,
    pub operator: Operator,
    pub right: String,
    pub result: String,
}

impl Fold {
    /// Whether the fold produced the division-by-zero sentinel.
    pub fn is_error(&self) -> bool {
        self.result == ERROR_SENTINEL
    }
}

/// The calculator's operand registers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registers {
    current: String,
    pending: Option<PendingOperation>,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Registers in their initial state: `("0", "", none)`.
    pub fn new() -> Self {
        Self {
            current: "0".to_string(),
            pending: None,
        }
    }

    /// Operand text currently being entered, or the last result.
    pub fn current_operand(&self) -> &str {
        &self.current
    }

    /// Left operand of the pending operation, empty if nothing is pending.
    pub fn previous_operand(&self) -> &str {
        self.pending.as_ref().map_or("", |p| p.operand.as_str())
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.as_ref().map(|p| p.operator)
    }

    pub fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    /// Whether the current operand shows the division-by-zero sentinel.
    pub fn shows_error(&self) -> bool {
        self.current == ERROR_SENTINEL
    }

    /// Whether these are exactly the initial registers.
    pub fn is_initial(&self) -> bool {
        self.current == "0" && self.pending.is_none()
    }

    /// Append a digit or decimal point to the current operand.
    ///
    /// A leading `"0"` is replaced by a digit, and a second decimal point
    /// is rejected. The error sentinel is treated as a fresh `"0"`.
    pub fn push_token(&mut self, token: char) -> Result<(), NoOp> {
        if !token.is_ascii_digit() && token != '.' {
            return Err(NoOp::InvalidToken);
        }
        if self.shows_error() {
            self.current = "0".to_string();
        }
        if token == '.' && self.current.contains('.') {
            return Err(NoOp::DuplicateDecimal);
        }
        if self.current == "0" && token != '.' {
            self.current = token.to_string();
        } else {
            self.current.push(token);
        }
        Ok(())
    }

    /// Remove the last character of the current operand, never leaving it
    /// blank. Deleting the error sentinel resets the operand to `"0"`.
    pub fn pop_char(&mut self) -> Result<(), NoOp> {
        if self.current == "0" {
            return Err(NoOp::NothingToDelete);
        }
        if self.shows_error() {
            self.current.clear();
        } else {
            self.current.pop();
        }
        if self.current.is_empty() {
            self.current = "0".to_string();
        }
        Ok(())
    }

    /// Capture the current operand as the left side of `operator` and
    /// clear the current operand for the right side.
    ///
    /// Does not fold an existing pending operation; callers chain by
    /// calling [`fold`](Self::fold) first. The error sentinel is captured
    /// like any other operand; folding it later is a no-op.
    pub fn begin_operation(&mut self, operator: Operator) -> Result<(), NoOp> {
        if self.current.is_empty() {
            return Err(NoOp::EmptyOperand);
        }
        let operand = std::mem::take(&mut self.current);
        self.pending = Some(PendingOperation { operand, operator });
        Ok(())
    }

    /// Evaluate the pending operation into the current operand.
    ///
    /// Leaves the registers untouched when either operand does not parse
    /// or nothing is pending.
    pub fn fold(&mut self) -> Result<Fold, NoOp> {
        let pending = self.pending.as_ref().ok_or(NoOp::NothingPending)?;
        let left = parse_operand(&pending.operand).ok_or(NoOp::NotAnOperand)?;
        let right = parse_operand(&self.current).ok_or(if self.current.is_empty() {
            NoOp::EmptyOperand
        } else {
            NoOp::NotAnOperand
        })?;

        let result = pending
            .operator
            .apply(left, right)
            .map_or_else(|| ERROR_SENTINEL.to_string(), format_number);

        let Some(pending) = self.pending.take() else {
            return Err(NoOp::NothingPending);
        };
        let right = std::mem::replace(&mut self.current, result.clone());
        Ok(Fold {
            left: pending.operand,
            operator: pending.operator,
            right,
            result,
        })
    }

    /// Reset to the initial registers.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The two lines a display shows for these registers.
    pub fn frame(&self) -> Frame {
        let previous = match &self.pending {
            Some(p) => format!("{} {}", p.operand, p.operator),
            None => String::new(),
        };
        Frame {
            current: self.current.clone(),
            previous,
        }
    }
}

/// What a display sink renders: the current operand line and the
/// `previous operand + operator` line.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub current: String,
    pub previous: String,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.previous)?;
        write!(f, "{}", self.current)
    }
}
