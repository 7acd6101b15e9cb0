//! Input error types.

use thiserror::Error;

/// A single problem found while reading keys or key bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unknown key name '{{{name}}}' at position {position}")]
    UnknownKey { name: String, position: usize },

    #[error("unterminated key name starting at position {position}")]
    UnterminatedKey { position: usize },
}

/// Every problem found in one key script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid key script: {}", join(.0))]
pub struct KeyScriptError(pub Vec<InputError>);

fn join(errors: &[InputError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
