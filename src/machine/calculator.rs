//! The calculator controller.

use crate::builder::CalculatorBuilder;
use crate::checkpoint::Checkpoint;
use crate::core::{Calculation, Fold, Frame, NoOp, Operator, Phase, Registers, State, Tape};
use crate::input::Action;
use crate::machine::sink::DisplaySink;
use crate::machine::step::StepResult;

/// Keypad calculator driving a display sink.
///
/// Each operation is a complete, synchronous transition. An operation that
/// changes the registers refreshes the sink exactly once, after the change;
/// an ignored operation leaves both registers and sink alone.
///
/// # Example
///
/// ```rust
/// use keycalc::core::Operator;
/// use keycalc::machine::{Calculator, RecordingSink};
///
/// let mut calc = Calculator::new(RecordingSink::new());
/// calc.append('7');
/// calc.set_operator(Operator::Divide);
/// calc.append('2');
/// calc.compute();
///
/// assert_eq!(calc.current_operand(), "3.5");
/// assert_eq!(calc.sink().len(), 4);
/// ```
#[derive(Debug)]
pub struct Calculator<D: DisplaySink> {
    registers: Registers,
    phase: Phase,
    tape: Tape,
    sink: D,
}

impl<D: DisplaySink> Calculator<D> {
    /// Create a calculator in its initial state.
    pub fn new(sink: D) -> Self {
        Self::from_parts(Registers::new(), Phase::Idle, Tape::new(), sink)
    }

    /// Start a [`CalculatorBuilder`].
    pub fn builder() -> CalculatorBuilder<D> {
        CalculatorBuilder::new()
    }

    pub(crate) fn from_parts(registers: Registers, phase: Phase, tape: Tape, sink: D) -> Self {
        Self {
            registers,
            phase,
            tape,
            sink,
        }
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn into_sink(self) -> D {
        self.sink
    }

    pub fn current_operand(&self) -> &str {
        self.registers.current_operand()
    }

    pub fn previous_operand(&self) -> &str {
        self.registers.previous_operand()
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.registers.pending_operator()
    }

    /// The frame a display would currently show.
    pub fn frame(&self) -> Frame {
        self.registers.frame()
    }

    /// Snapshot registers, phase and tape.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(&self.registers, self.phase, &self.tape)
    }

    /// Run the operation an input action stands for.
    pub fn apply(&mut self, action: Action) -> StepResult {
        match action {
            Action::Digit(digit) => self.append(digit),
            Action::Decimal => self.append('.'),
            Action::Operator(operator) => self.set_operator(operator),
            Action::Compute => self.compute(),
            Action::DeleteLast => self.delete_last(),
            Action::ClearAll => self.clear_all(),
            Action::None => self.ignore("apply", NoOp::UnmappedKey),
        }
    }

    /// Append a digit `0`-`9` or a decimal point `.` to the current operand.
    pub fn append(&mut self, token: char) -> StepResult {
        let from = self.phase;
        match self.registers.push_token(token) {
            Ok(()) => self.commit("append", from, Phase::Accumulating),
            Err(reason) => self.ignore("append", reason),
        }
    }

    /// Append the decimal digit `digit` (`0..=9`); larger values are ignored.
    pub fn append_digit(&mut self, digit: u8) -> StepResult {
        match char::from_digit(u32::from(digit), 10) {
            Some(token) => self.append(token),
            None => self.ignore("append_digit", NoOp::InvalidToken),
        }
    }

    pub fn append_decimal(&mut self) -> StepResult {
        self.append('.')
    }

    /// Remove the last character of the current operand.
    pub fn delete_last(&mut self) -> StepResult {
        let from = self.phase;
        match self.registers.pop_char() {
            Ok(()) => {
                let to = if self.registers.is_initial() {
                    Phase::Idle
                } else {
                    Phase::Accumulating
                };
                self.commit("delete_last", from, to)
            }
            Err(reason) => self.ignore("delete_last", reason),
        }
    }

    /// Enter an operator, folding a pending operation first.
    ///
    /// Ignored while the current operand is empty, so pressing a second
    /// operator right after the first keeps the first one. A fold that
    /// divides by zero leaves `"Error"` as the new left operand.
    pub fn set_operator(&mut self, operator: Operator) -> StepResult {
        let from = self.phase;
        if self.registers.current_operand().is_empty() {
            return self.ignore("set_operator", NoOp::EmptyOperand);
        }

        if self.registers.pending().is_some() {
            match self.registers.fold() {
                Ok(fold) => self.record(fold),
                Err(reason) => tracing::trace!(%reason, "chained fold skipped"),
            }
        }

        match self.registers.begin_operation(operator) {
            Ok(()) => self.commit("set_operator", from, Phase::OperatorPending),
            Err(reason) => self.ignore("set_operator", reason),
        }
    }

    /// Evaluate the pending operation.
    pub fn compute(&mut self) -> StepResult {
        let from = self.phase;
        match self.registers.fold() {
            Ok(fold) => {
                let to = if fold.is_error() {
                    Phase::Errored
                } else {
                    Phase::Idle
                };
                self.record(fold);
                self.commit("compute", from, to)
            }
            Err(reason) => self.ignore("compute", reason),
        }
    }

    /// Reset the registers to `("0", "", none)`. The tape is kept.
    pub fn clear_all(&mut self) -> StepResult {
        let from = self.phase;
        self.registers.reset();
        self.commit("clear_all", from, Phase::Idle)
    }

    /// Forget every recorded calculation.
    pub fn clear_history(&mut self) {
        self.tape = self.tape.cleared();
        tracing::debug!("tape cleared");
    }

    fn record(&mut self, fold: Fold) {
        let calculation = Calculation::from_fold(fold);
        tracing::debug!(%calculation, "operation folded");
        self.tape = self.tape.record(calculation);
    }

    fn commit(&mut self, operation: &'static str, from: Phase, to: Phase) -> StepResult {
        self.phase = to;
        let frame = self.registers.frame();
        tracing::debug!(
            operation,
            %from,
            %to,
            current = %frame.current,
            previous = %frame.previous,
            "step applied"
        );
        self.sink.render(&frame);
        StepResult::Changed { from, to }
    }

    fn ignore(&self, operation: &'static str, reason: NoOp) -> StepResult {
        tracing::trace!(operation, %reason, phase = self.phase.name(), "step ignored");
        StepResult::Ignored(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ERROR_SENTINEL;
    use crate::machine::sink::RecordingSink;

    fn calculator() -> Calculator<RecordingSink> {
        Calculator::new(RecordingSink::new())
    }

    fn press(calc: &mut Calculator<RecordingSink>, keys: &str) {
        for key in keys.chars() {
            match key {
                '=' => calc.compute(),
                '<' => calc.delete_last(),
                'C' => calc.clear_all(),
                op @ ('+' | '-' | '*' | '/') => {
                    calc.set_operator(Operator::try_from(op).unwrap())
                }
                token => calc.append(token),
            };
        }
    }

    #[test]
    fn starts_idle_with_initial_registers() {
        let calc = calculator();
        assert_eq!(calc.current_operand(), "0");
        assert_eq!(calc.previous_operand(), "");
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.phase(), Phase::Idle);
        assert!(calc.sink().is_empty());
    }

    #[test]
    fn digit_entry_moves_to_accumulating() {
        let mut calc = calculator();
        let step = calc.append('5');
        assert_eq!(
            step,
            StepResult::Changed {
                from: Phase::Idle,
                to: Phase::Accumulating
            }
        );
        assert_eq!(calc.current_operand(), "5");
    }

    #[test]
    fn basic_arithmetic() {
        for (keys, expected) in [
            ("2+2=", "4"),
            ("10-4=", "6"),
            ("3*3=", "9"),
            ("7/2=", "3.5"),
        ] {
            let mut calc = calculator();
            press(&mut calc, keys);
            assert_eq!(calc.current_operand(), expected, "keys {keys}");
            assert_eq!(calc.phase(), Phase::Idle);
        }
    }

    #[test]
    fn chaining_folds_left_to_right() {
        let mut calc = calculator();
        press(&mut calc, "5+3+");
        assert_eq!(calc.previous_operand(), "8");
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        press(&mut calc, "2=");
        assert_eq!(calc.current_operand(), "10");
        assert_eq!(calc.tape().results(), vec!["8", "10"]);
    }

    #[test]
    fn chaining_refreshes_display_once() {
        let mut calc = calculator();
        press(&mut calc, "5+3");
        let before = calc.sink().len();
        calc.set_operator(Operator::Multiply);
        assert_eq!(calc.sink().len(), before + 1);
        assert_eq!(calc.sink().last().unwrap().previous, "8 *");
    }

    #[test]
    fn division_by_zero_shows_error_and_clears_pending() {
        let mut calc = calculator();
        press(&mut calc, "9/0=");
        assert_eq!(calc.current_operand(), ERROR_SENTINEL);
        assert_eq!(calc.previous_operand(), "");
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.phase(), Phase::Errored);
        assert!(calc.tape().last().unwrap().is_error());
    }

    #[test]
    fn digit_after_error_starts_fresh() {
        let mut calc = calculator();
        press(&mut calc, "9/0=4");
        assert_eq!(calc.current_operand(), "4");
        assert_eq!(calc.phase(), Phase::Accumulating);
    }

    #[test]
    fn operator_after_error_captures_sentinel() {
        let mut calc = calculator();
        press(&mut calc, "9/0=");
        let frames = calc.sink().len();
        assert_eq!(
            calc.set_operator(Operator::Add),
            StepResult::Changed {
                from: Phase::Errored,
                to: Phase::OperatorPending
            }
        );
        assert_eq!(calc.previous_operand(), ERROR_SENTINEL);
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert_eq!(calc.current_operand(), "");
        assert_eq!(calc.sink().len(), frames + 1);

        press(&mut calc, "5");
        assert_eq!(calc.compute(), StepResult::Ignored(NoOp::NotAnOperand));
        assert_eq!(calc.current_operand(), "5");
    }

    #[test]
    fn chained_division_by_zero_carries_error_forward() {
        let mut calc = calculator();
        press(&mut calc, "9/0");
        let frames = calc.sink().len();
        let step = calc.set_operator(Operator::Add);
        assert_eq!(
            step,
            StepResult::Changed {
                from: Phase::Accumulating,
                to: Phase::OperatorPending
            }
        );
        assert_eq!(calc.previous_operand(), ERROR_SENTINEL);
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert_eq!(calc.current_operand(), "");
        assert_eq!(calc.sink().len(), frames + 1);
        assert_eq!(
            calc.sink().last().map(|f| f.previous.as_str()),
            Some("Error +")
        );
        assert_eq!(calc.tape().results(), vec![ERROR_SENTINEL]);
    }

    #[test]
    fn second_operator_is_ignored() {
        let mut calc = calculator();
        press(&mut calc, "5+");
        let frames = calc.sink().len();
        let step = calc.set_operator(Operator::Multiply);
        assert_eq!(step, StepResult::Ignored(NoOp::EmptyOperand));
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert_eq!(calc.previous_operand(), "5");
        assert_eq!(calc.sink().len(), frames);
    }

    #[test]
    fn compute_right_after_operator_is_ignored() {
        let mut calc = calculator();
        press(&mut calc, "5+");
        let snapshot = calc.registers().clone();
        assert_eq!(calc.compute(), StepResult::Ignored(NoOp::EmptyOperand));
        assert_eq!(calc.registers(), &snapshot);
        assert_eq!(calc.phase(), Phase::OperatorPending);
    }

    #[test]
    fn compute_without_pending_is_ignored() {
        let mut calc = calculator();
        press(&mut calc, "42");
        assert_eq!(calc.compute(), StepResult::Ignored(NoOp::NothingPending));
        assert_eq!(calc.current_operand(), "42");
        assert_eq!(calc.sink().len(), 2);
    }

    #[test]
    fn result_can_be_extended_by_typing() {
        let mut calc = calculator();
        press(&mut calc, "4+4=5");
        assert_eq!(calc.current_operand(), "85");
    }

    #[test]
    fn delete_returns_to_idle_at_zero() {
        let mut calc = calculator();
        press(&mut calc, "12<");
        assert_eq!(calc.phase(), Phase::Accumulating);
        press(&mut calc, "<");
        assert_eq!(calc.current_operand(), "0");
        assert_eq!(calc.phase(), Phase::Idle);
        assert_eq!(
            calc.delete_last(),
            StepResult::Ignored(NoOp::NothingToDelete)
        );
    }

    #[test]
    fn delete_after_operator_shows_zero_operand() {
        let mut calc = calculator();
        press(&mut calc, "5+<");
        assert_eq!(calc.current_operand(), "0");
        assert_eq!(calc.previous_operand(), "5");
        assert_eq!(calc.phase(), Phase::Accumulating);
    }

    #[test]
    fn clear_all_resets_registers_but_keeps_tape() {
        let mut calc = calculator();
        press(&mut calc, "2+2=3*");
        let step = calc.clear_all();
        assert_eq!(
            step,
            StepResult::Changed {
                from: Phase::OperatorPending,
                to: Phase::Idle
            }
        );
        assert_eq!(calc.registers(), &Registers::new());
        assert_eq!(calc.tape().len(), 1);

        calc.clear_history();
        assert!(calc.tape().is_empty());
    }

    #[test]
    fn apply_dispatches_actions() {
        let mut calc = calculator();
        calc.apply(Action::Digit('6'));
        calc.apply(Action::Operator(Operator::Multiply));
        calc.apply(Action::Digit('7'));
        calc.apply(Action::Compute);
        assert_eq!(calc.current_operand(), "42");

        calc.apply(Action::Decimal);
        assert_eq!(calc.current_operand(), "42.");
        calc.apply(Action::DeleteLast);
        assert_eq!(calc.current_operand(), "42");
        calc.apply(Action::ClearAll);
        assert_eq!(calc.current_operand(), "0");

        assert_eq!(
            calc.apply(Action::None),
            StepResult::Ignored(NoOp::UnmappedKey)
        );
    }

    #[test]
    fn ignored_steps_do_not_render() {
        let mut calc = calculator();
        calc.append('x');
        calc.delete_last();
        calc.compute();
        calc.append('.');
        calc.append('.');
        assert_eq!(calc.sink().len(), 1);
    }

    #[test]
    fn append_digit_takes_numeric_values() {
        let mut calc = calculator();
        calc.append_digit(4);
        calc.append_digit(2);
        assert_eq!(calc.current_operand(), "42");
        assert_eq!(
            calc.append_digit(10),
            StepResult::Ignored(NoOp::InvalidToken)
        );
        assert_eq!(calc.sink().len(), 2);
    }
}
