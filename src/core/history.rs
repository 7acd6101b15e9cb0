//! Calculation tape.
//!
//! The tape keeps a bounded, ordered record of every folded operation.
//! Like the registers it is a plain value; `record` returns a new tape
//! instead of mutating the old one.

use super::number::ERROR_SENTINEL;
use super::registers::{Fold, Operator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Number of calculations a tape keeps unless configured otherwise.
pub const DEFAULT_TAPE_LIMIT: usize = 100;

/// Record of a single folded operation.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Calculation, Operator};
/// use chrono::Utc;
///
/// let calc = Calculation {
///     left: "5".to_string(),
///     operator: Operator::Add,
///     right: "3".to_string(),
///     result: "8".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(calc.to_string(), "5 + 3 = 8");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Left operand text as it was entered
    pub left: String,
    /// The operator that was applied
    pub operator: Operator,
    /// Right operand text as it was entered
    pub right: String,
    /// Result text, or the `"Error"` sentinel
    pub result: String,
    /// When the operation was folded
    pub timestamp: DateTime<Utc>,
}

impl Calculation {
    /// Stamp a fold with the current time.
    pub fn from_fold(fold: Fold) -> Self {
        Self {
            left: fold.left,
            operator: fold.operator,
            right: fold.right,
            result: fold.result,
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.result == ERROR_SENTINEL
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.left, self.operator, self.right, self.result
        )
    }
}

/// Ordered, bounded history of calculations.
///
/// When the tape is full, recording drops the oldest entry.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Calculation, Operator, Tape};
/// use chrono::Utc;
///
/// let entry = |result: &str| Calculation {
///     left: "1".to_string(),
///     operator: Operator::Add,
///     right: "1".to_string(),
///     result: result.to_string(),
///     timestamp: Utc::now(),
/// };
///
/// let tape = Tape::with_limit(2)
///     .record(entry("2"))
///     .record(entry("3"))
///     .record(entry("4"));
///
/// assert_eq!(tape.results(), vec!["3", "4"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tape {
    entries: Vec<Calculation>,
    limit: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Create an empty tape holding up to [`DEFAULT_TAPE_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_TAPE_LIMIT)
    }

    /// Create an empty tape holding up to `limit` entries.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Return this tape with a new limit, dropping the oldest entries
    /// that no longer fit.
    pub fn relimited(&self, limit: usize) -> Self {
        let skip = self.entries.len().saturating_sub(limit);
        Self {
            entries: self.entries[skip..].to_vec(),
            limit,
        }
    }

    /// Record a calculation, returning a new tape.
    ///
    /// This is a pure function - the existing tape is left unchanged.
    pub fn record(&self, calculation: Calculation) -> Self {
        let mut entries = self.entries.clone();
        entries.push(calculation);
        let overflow = entries.len().saturating_sub(self.limit);
        entries.drain(..overflow);
        Self {
            entries,
            limit: self.limit,
        }
    }

    /// Return an empty tape with the same limit.
    pub fn cleared(&self) -> Self {
        Self::with_limit(self.limit)
    }

    /// All recorded calculations, oldest first.
    pub fn entries(&self) -> &[Calculation] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Calculation> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Result texts in recording order.
    pub fn results(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.result.as_str()).collect()
    }

    /// Time between the first and last recorded calculation.
    ///
    /// Returns `None` for an empty tape.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.entries.first()?, self.entries.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
