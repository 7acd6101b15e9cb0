//! Input source adapter.
//!
//! Turns raw key presses into the six logical calculator calls. Key
//! scripts (`"12{bs}3+4="`) let the CLI and tests drive the calculator
//! the same way a keyboard would.

mod error;
mod handler;
mod key;

pub use error::{InputError, KeyScriptError};
pub use handler::{Action, InputHandler};
pub use key::{parse_keys, Key};

use crate::machine::{Calculator, DisplaySink, StepResult};

/// Parse a key script and feed every key through `handler` into `calc`.
///
/// Nothing is applied when the script fails to parse.
///
/// ```rust
/// use keycalc::input::{run_script, InputHandler};
/// use keycalc::machine::{Calculator, LatestSink};
///
/// let mut calc = Calculator::new(LatestSink::new());
/// run_script(&mut calc, &InputHandler::new(), "5+3+2=").unwrap();
/// assert_eq!(calc.current_operand(), "10");
/// ```
pub fn run_script<D: DisplaySink>(
    calc: &mut Calculator<D>,
    handler: &InputHandler,
    script: &str,
) -> Result<Vec<StepResult>, KeyScriptError> {
    let keys = parse_keys(script)?;
    Ok(keys
        .into_iter()
        .map(|key| calc.apply(handler.handle_key(key)))
        .collect())
}
