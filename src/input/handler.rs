//! Mapping key presses to calculator actions.

use crate::core::Operator;
use crate::input::error::InputError;
use crate::input::key::Key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// The logical calculator call a key press stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Append a digit `0`-`9`
    Digit(char),
    /// Append a decimal point
    Decimal,
    /// Enter an operator
    Operator(Operator),
    /// Evaluate the pending operation
    Compute,
    /// Remove the last character
    DeleteLast,
    /// Reset all registers
    ClearAll,
    /// Key has no meaning for the calculator
    None,
}

impl FromStr for Action {
    type Err = InputError;

    /// Parse an action name as used in key bindings: a digit, one of
    /// `+ - * / = .`, or `clear` / `delete`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "=" | "compute" => Ok(Self::Compute),
            "." | "decimal" => Ok(Self::Decimal),
            "clear" => Ok(Self::ClearAll),
            "delete" | "backspace" => Ok(Self::DeleteLast),
            name => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(d), None) if d.is_ascii_digit() => Ok(Self::Digit(d)),
                    (Some(symbol), None) => Operator::try_from(symbol)
                        .map(Self::Operator)
                        .map_err(|_| InputError::UnknownAction(s.to_string())),
                    _ => Err(InputError::UnknownAction(s.to_string())),
                }
            }
        }
    }
}

/// Input handler that maps key events to actions.
///
/// Built-in bindings follow the keypad: digits, `.`, the four operators,
/// `=` or Enter to compute, Backspace or Delete to delete, Escape to clear.
/// Character aliases take precedence over built-in bindings.
///
/// ```rust
/// use keycalc::core::Operator;
/// use keycalc::input::{Action, InputHandler, Key};
///
/// let handler = InputHandler::new().alias('x', Action::Operator(Operator::Multiply));
///
/// assert_eq!(handler.handle_key(Key::Char('7')), Action::Digit('7'));
/// assert_eq!(handler.handle_key(Key::Enter), Action::Compute);
/// assert_eq!(
///     handler.handle_key(Key::Char('x')),
///     Action::Operator(Operator::Multiply)
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct InputHandler {
    aliases: HashMap<char, Action>,
}

impl InputHandler {
    /// Creates a handler with only the built-in bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handler with the given character aliases.
    #[must_use]
    pub fn with_aliases(aliases: HashMap<char, Action>) -> Self {
        Self { aliases }
    }

    /// Bind `key` to `action`, replacing any earlier binding.
    #[must_use]
    pub fn alias(mut self, key: char, action: Action) -> Self {
        self.aliases.insert(key, action);
        self
    }

    /// Maps a key event to an action.
    #[must_use]
    pub fn handle_key(&self, key: Key) -> Action {
        match key {
            Key::Char(c) => self
                .aliases
                .get(&c)
                .copied()
                .unwrap_or_else(|| Self::builtin(c)),
            Key::Enter => Action::Compute,
            Key::Backspace | Key::Delete => Action::DeleteLast,
            Key::Escape => Action::ClearAll,
        }
    }

    fn builtin(c: char) -> Action {
        match c {
            '0'..='9' => Action::Digit(c),
            '.' => Action::Decimal,
            '=' => Action::Compute,
            other => Operator::try_from(other).map_or(Action::None, Action::Operator),
        }
    }
}
