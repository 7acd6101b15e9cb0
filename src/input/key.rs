//! Raw key presses and key-script parsing.

use crate::input::error::{InputError, KeyScriptError};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// A raw key press, before it is mapped to a calculator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character key
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
}

impl Key {
    /// Look up a special key by its script name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(Self::Enter),
            "bs" | "backspace" => Some(Self::Backspace),
            "del" | "delete" => Some(Self::Delete),
            "esc" | "escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

type KeyCheck = Validation<Key, NonEmptyVec<InputError>>;

/// Parse a key script into key presses.
///
/// Every character is one key press, except `{name}` which names a
/// special key: `{enter}`, `{bs}`/`{backspace}`, `{del}`/`{delete}` and
/// `{esc}`/`{escape}`. All unknown names and unterminated braces are
/// reported together rather than stopping at the first one.
///
/// ```rust
/// use keycalc::input::{parse_keys, Key};
///
/// let keys = parse_keys("12{bs}=").unwrap();
/// assert_eq!(
///     keys,
///     vec![Key::Char('1'), Key::Char('2'), Key::Backspace, Key::Char('=')]
/// );
///
/// let err = parse_keys("{nope}1{oops}").unwrap_err();
/// assert_eq!(err.0.len(), 2);
/// ```
pub fn parse_keys(script: &str) -> Result<Vec<Key>, KeyScriptError> {
    let mut checks: Vec<KeyCheck> = Vec::new();
    let mut chars = script.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        if c != '{' {
            checks.push(Validation::success(Key::Char(c)));
            continue;
        }

        let mut name = String::new();
        let mut terminated = false;
        while let Some((_, next)) = chars.next_if(|&(_, next)| next != '{') {
            if next == '}' {
                terminated = true;
                break;
            }
            name.push(next);
        }

        let check = if !terminated {
            Validation::fail(InputError::UnterminatedKey { position })
        } else {
            match Key::from_name(&name) {
                Some(key) => Validation::success(key),
                None => Validation::fail(InputError::UnknownKey { name, position }),
            }
        };
        checks.push(check);
    }

    match Validation::all_vec(checks) {
        Validation::Success(keys) => Ok(keys),
        Validation::Failure(errors) => Err(KeyScriptError(errors.iter().cloned().collect())),
    }
}
