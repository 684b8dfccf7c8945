//! # session.rs
//!
//! The calculator state machine.
//!
//! A [`Session`] owns the expression buffer, the displayed result, the memory
//! register, the history and both modes. Every user action is one method
//! call.
//!
//! A failed action shows `Error` and schedules a reset of the display. Only
//! a failed evaluation also clears the expression buffer; other failures
//! leave it as typed. The reset is a deadline stored in the session:
//! [`Session::poll`] fires it once due, and any later action cancels it
//! before running. Failures never touch memory or history.
//!
//! # Example
//! ```rust
//! use calcpad::{FunctionKind, Session};
//!
//! let mut session = Session::default();
//! session.input_function(FunctionKind::Sqrt);
//! for ch in "16".chars() {
//!     session.input_digit(ch);
//! }
//! session.input_paren(')').unwrap();
//! session.evaluate().unwrap();
//! assert_eq!(session.result_display(), "4");
//! assert_eq!(session.history().get(0).unwrap().expression, "sqrt(16)");
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::base;
use crate::builder::SessionConfig;
use crate::error::{CalcError, CalcResult};
use crate::evaluator;
use crate::format::format_in_base;
use crate::history::History;
use crate::memory::Memory;
use crate::mode::{AngleMode, NumeralBase};
use crate::parser::{constant, BinaryOperatorKind, FunctionKind};

/// Text shown after a failed action.
pub const ERROR_DISPLAY: &str = "Error";

/// Text shown by a clean display.
const ZERO_DISPLAY: &str = "0";

/// Operator symbols a new operator replaces when they end the buffer.
const TRAILING_OPERATORS: [char; 9] = ['+', '-', '*', '/', '^', '%', '×', '÷', '−'];

/// One calculator: buffer, display, memory, history and modes.
#[derive(Debug, Clone)]
pub struct Session {
    expression: String,
    result: String,
    memory: Memory,
    history: History,
    base: NumeralBase,
    angle: AngleMode,
    error_reset_delay: Duration,
    pending_reset: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Session impl of construction and output surface
impl Session {
    /// Creates a session from `config`, showing `0`.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            expression: String::new(),
            result: ZERO_DISPLAY.to_string(),
            memory: Memory::default(),
            history: History::with_capacity(config.history_capacity),
            base: config.base,
            angle: config.angle,
            error_reset_delay: config.error_reset_delay,
            pending_reset: None,
        }
    }

    /// The expression buffer, or `0` when it is empty.
    pub fn expression_display(&self) -> &str {
        if self.expression.is_empty() {
            ZERO_DISPLAY
        } else {
            &self.expression
        }
    }

    /// The raw expression buffer.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The result line: the last result, `0`, or `Error`.
    pub fn result_display(&self) -> &str {
        &self.result
    }

    /// `M: <value>` while the memory register is non-zero, empty otherwise.
    pub fn memory_indicator(&self) -> String {
        self.memory.indicator()
    }

    /// The memory register.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Finished calculations, most recent first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current numeral base.
    pub fn base(&self) -> NumeralBase {
        self.base
    }

    /// Current angle mode.
    pub fn angle_mode(&self) -> AngleMode {
        self.angle
    }

    /// Deadline of the scheduled error reset, if any.
    pub fn pending_reset(&self) -> Option<Instant> {
        self.pending_reset
    }

    /// Fires the scheduled error reset once `now` reaches its deadline.
    ///
    /// Returns true if the display was reset.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_reset {
            Some(deadline) if now >= deadline => {
                self.pending_reset = None;
                self.result = ZERO_DISPLAY.to_string();
                debug!("error display reset");
                true
            },
            _ => false,
        }
    }
}

/// Session impl of the internal helpers
impl Session {
    /// Cancels a pending error reset, restoring the clean display.
    fn begin_action(&mut self) {
        if self.pending_reset.take().is_some() {
            self.result = ZERO_DISPLAY.to_string();
        }
    }

    /// Shows `Error` and schedules the reset. The buffer is left alone.
    fn fail(&mut self, action: &str, err: CalcError) -> CalcError {
        warn!(action, error = %err, "calculator action failed");
        self.result = ERROR_DISPLAY.to_string();
        self.pending_reset = Some(Instant::now() + self.error_reset_delay);
        err
    }

    /// Runs a fallible step, routing its error through [`Session::fail`].
    fn guard<T>(&mut self, action: &str, res: CalcResult<T>) -> CalcResult<T> {
        res.map_err(|err| self.fail(action, err))
    }

    /// Value of the displayed result, read in the current base.
    fn result_value(&self) -> CalcResult<f64> {
        match self.base {
            NumeralBase::Decimal => self.result.trim().parse::<f64>()
                .map_err(|_| CalcError::expression(format!("\"{}\" is not a number", self.result))),
            other => Ok(base::from_base(&self.result, other.radix())? as f64),
        }
    }

    /// Integer part of the displayed result, read in the current base.
    fn result_integer(&self) -> CalcResult<i64> {
        base::read_integer(&self.result, self.base)
    }

    /// Shows `value` as the result, rendered in the current base.
    fn show(&mut self, value: f64) -> CalcResult<()> {
        self.result = format_in_base(value, self.base)?;
        Ok(())
    }
}

/// Session impl of the input actions
impl Session {
    /// Appends a digit (or `.` in decimal mode).
    ///
    /// Characters that are not digits of the current base are ignored;
    /// returns whether the character was accepted.
    pub fn input_digit(&mut self, digit: char) -> bool {
        self.begin_action();
        if !self.base.accepts(digit) {
            return false;
        }
        self.expression.push(digit);
        true
    }

    /// Appends a binary operator.
    ///
    /// An empty buffer starts from the displayed result, and an operator
    /// already ending the buffer is replaced.
    ///
    /// # Errors
    /// [`CalcError::InvalidInput`] for a symbol that is not an operator; the
    /// session is left unchanged.
    pub fn input_operator(&mut self, operator: char) -> CalcResult<()> {
        self.begin_action();
        if !TRAILING_OPERATORS.contains(&operator) {
            return Err(CalcError::input("operator", format!("\"{}\" is not one of {:?}", operator, BinaryOperatorKind::names())));
        }

        if self.expression.is_empty() && self.result != ZERO_DISPLAY {
            self.expression = self.result.clone();
        }
        if self.expression.ends_with(TRAILING_OPERATORS) {
            self.expression.pop();
        }
        self.expression.push(operator);
        Ok(())
    }

    /// Appends a function call opening, e.g. `sin(`.
    pub fn input_function(&mut self, function: FunctionKind) {
        self.begin_action();
        self.expression.push_str(&function.to_string());
        self.expression.push('(');
    }

    /// Appends a named constant such as `PI` or `E`.
    ///
    /// # Errors
    /// [`CalcError::InvalidInput`] for an unknown constant; the session is
    /// left unchanged.
    pub fn input_constant(&mut self, name: &str) -> CalcResult<()> {
        self.begin_action();
        if constant::value(name).is_none() {
            return Err(CalcError::input("constant", format!("unknown constant \"{}\"", name)));
        }
        self.expression.push_str(name);
        Ok(())
    }

    /// Appends `(` or `)`.
    ///
    /// # Errors
    /// [`CalcError::InvalidInput`] for any other character.
    pub fn input_paren(&mut self, paren: char) -> CalcResult<()> {
        self.begin_action();
        if paren != '(' && paren != ')' {
            return Err(CalcError::input("parenthesis", format!("\"{}\" is not a parenthesis", paren)));
        }
        self.expression.push(paren);
        Ok(())
    }

    /// Replaces the buffer with `text`, as if it had been typed.
    pub fn set_expression(&mut self, text: &str) {
        self.begin_action();
        self.expression = text.to_string();
    }

    /// Evaluates the buffer.
    ///
    /// On success the result is shown in the current base, the pair is
    /// recorded in history and the buffer is cleared. On failure the buffer
    /// is cleared as well and `Error` is shown. Does nothing and returns
    /// `Ok(None)` when the buffer is empty.
    pub fn evaluate(&mut self) -> CalcResult<Option<f64>> {
        self.begin_action();
        if self.expression.is_empty() {
            return Ok(None);
        }

        let res = evaluator::evaluate(&self.expression, self.base, self.angle)
            .and_then(|value| format_in_base(value, self.base).map(|text| (value, text)));
        let (value, text) = match res {
            Ok(pair) => pair,
            Err(err) => {
                self.expression.clear();
                return Err(self.fail("evaluate", err));
            },
        };

        self.history.record(&self.expression, &text);
        debug!(expression = %self.expression, result = %text, "recorded calculation");
        self.result = text;
        self.expression.clear();
        Ok(Some(value))
    }

    /// Clears the buffer and the result.
    pub fn clear_all(&mut self) {
        self.begin_action();
        self.expression.clear();
        self.result = ZERO_DISPLAY.to_string();
    }

    /// Clears the buffer only.
    pub fn clear_entry(&mut self) {
        self.begin_action();
        self.expression.clear();
    }

    /// Removes the last character of the buffer.
    pub fn backspace(&mut self) {
        self.begin_action();
        self.expression.pop();
    }

    /// Replaces the result with the factorial of its integer part.
    ///
    /// # Errors
    /// [`CalcError::InvalidInput`] for a negative number, and
    /// [`CalcError::InvalidExpression`] when the factorial overflows.
    pub fn factorial(&mut self) -> CalcResult<()> {
        self.begin_action();
        let res = self.result_integer().and_then(|n| {
            if n < 0 {
                return Err(CalcError::input("factorial", "negative number"));
            }
            let mut product = 1.0_f64;
            for i in 2..=n {
                product *= i as f64;
                if product.is_infinite() {
                    return Err(CalcError::expression(format!("{}! is too large", n)));
                }
            }
            Ok(product)
        });
        let value = self.guard("factorial", res)?;
        let shown = self.show(value);
        self.guard("factorial", shown)?;
        self.expression.clear();
        Ok(())
    }
}

/// Session impl of the mode and programmer actions
impl Session {
    /// Switches between degrees and radians for later evaluations.
    pub fn set_angle_mode(&mut self, angle: AngleMode) {
        self.begin_action();
        self.angle = angle;
    }

    /// Switches the numeral base, re-rendering a shown result in the new base.
    pub fn set_base(&mut self, base: NumeralBase) -> CalcResult<()> {
        self.begin_action();
        if self.result != ZERO_DISPLAY {
            let res = base::convert_display(&self.result, self.base, base);
            self.result = self.guard("set_base", res)?;
        }
        self.base = base;
        Ok(())
    }

    /// Applies `op` to the integer part of the result.
    fn integer_op<F>(&mut self, action: &str, op: F) -> CalcResult<()>
    where
        F: FnOnce(i64) -> Option<i64>,
    {
        self.begin_action();
        let res = self.result_integer().and_then(|n| {
            let value = op(n).ok_or_else(|| CalcError::expression(format!("{} overflows on {}", action, n)))?;
            base::to_base(value, self.base.radix())
        });
        self.result = self.guard(action, res)?;
        Ok(())
    }

    /// Bitwise complement of the result.
    pub fn bitwise_not(&mut self) -> CalcResult<()> {
        self.integer_op("bitwise_not", |n| Some(!n))
    }

    /// Shifts the result left by one bit.
    pub fn shift_left(&mut self) -> CalcResult<()> {
        self.integer_op("shift_left", |n| n.checked_mul(2))
    }

    /// Arithmetic shift of the result right by one bit.
    pub fn shift_right(&mut self) -> CalcResult<()> {
        self.integer_op("shift_right", |n| Some(n >> 1))
    }
}

/// Session impl of the memory and history actions
impl Session {
    /// Stores the displayed result in memory.
    pub fn memory_store(&mut self) -> CalcResult<()> {
        self.begin_action();
        let res = self.result_value();
        let value = self.guard("memory_store", res)?;
        self.memory.store(value);
        Ok(())
    }

    /// Replaces the buffer with the memory value.
    pub fn memory_recall(&mut self) -> CalcResult<()> {
        self.begin_action();
        let res = format_in_base(self.memory.recall(), self.base);
        self.expression = self.guard("memory_recall", res)?;
        Ok(())
    }

    /// Adds the displayed result to memory.
    pub fn memory_add(&mut self) -> CalcResult<()> {
        self.begin_action();
        let res = self.result_value();
        let value = self.guard("memory_add", res)?;
        self.memory.add(value);
        Ok(())
    }

    /// Subtracts the displayed result from memory.
    pub fn memory_subtract(&mut self) -> CalcResult<()> {
        self.begin_action();
        let res = self.result_value();
        let value = self.guard("memory_subtract", res)?;
        self.memory.subtract(value);
        Ok(())
    }

    /// Resets memory to zero.
    pub fn memory_clear(&mut self) {
        self.begin_action();
        self.memory.clear();
    }

    /// Puts the expression of history entry `index` (0 = most recent) back
    /// into the buffer.
    ///
    /// # Errors
    /// [`CalcError::InvalidInput`] when there is no such entry; the session
    /// is left unchanged.
    pub fn recall_history(&mut self, index: usize) -> CalcResult<()> {
        self.begin_action();
        let entry = self.history.get(index)
            .ok_or_else(|| CalcError::input("history", format!("no entry {}", index)))?;
        self.expression = entry.expression.clone();
        Ok(())
    }

    /// Drops every history entry.
    pub fn clear_history(&mut self) {
        self.begin_action();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SessionBuilder;
    use approx::assert_abs_diff_eq;

    fn type_in(session: &mut Session, text: &str) {
        for ch in text.chars() {
            match ch {
                '(' | ')' => session.input_paren(ch).unwrap(),
                c if TRAILING_OPERATORS.contains(&c) => session.input_operator(c).unwrap(),
                c => assert!(session.input_digit(c), "rejected {c}"),
            }
        }
    }

    fn failed_session() -> Session {
        let mut session = Session::default();
        session.set_expression("1 / 0");
        assert!(session.evaluate().is_err());
        session
    }

    #[test]
    fn test_initial_display() {
        let session = Session::default();
        assert_eq!(session.expression_display(), "0");
        assert_eq!(session.result_display(), "0");
        assert_eq!(session.memory_indicator(), "");
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_evaluate_records_history() {
        let mut session = Session::default();
        type_in(&mut session, "2+3*4");
        assert_eq!(session.expression_display(), "2+3*4");
        assert_eq!(session.evaluate(), Ok(Some(14.0)));
        assert_eq!(session.result_display(), "14");
        assert_eq!(session.expression(), "");
        assert_eq!(session.history().get(0).map(|e| e.to_string()), Some("2+3*4 = 14".to_string()));
    }

    #[test]
    fn test_evaluate_empty_buffer_is_a_no_op() {
        let mut session = Session::default();
        assert_eq!(session.evaluate(), Ok(None));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_operator_continues_from_result_and_replaces_trailing_operator() {
        let mut session = Session::default();
        type_in(&mut session, "6*7");
        session.evaluate().unwrap();
        session.input_operator('+').unwrap();
        session.input_operator('-').unwrap();
        assert_eq!(session.expression(), "42-");
        type_in(&mut session, "2");
        assert_eq!(session.evaluate(), Ok(Some(40.0)));
        assert!(session.input_operator('&').is_err());
    }

    #[test]
    fn test_functions_and_constants() {
        let mut session = Session::default();
        session.input_function(FunctionKind::Sqrt);
        type_in(&mut session, "16)");
        session.input_operator('+').unwrap();
        session.input_constant("PI").unwrap();
        assert_eq!(session.expression(), "sqrt(16)+PI");
        let value = session.evaluate().unwrap().unwrap();
        assert_abs_diff_eq!(value, 4.0 + std::f64::consts::PI, epsilon = 1.0e-12);
        assert!(session.input_constant("TAU").is_err());
    }

    #[test]
    fn test_digits_follow_the_base() {
        let mut session = SessionBuilder::new().with_base(NumeralBase::Binary).build();
        assert!(session.input_digit('1'));
        assert!(!session.input_digit('2'));
        assert!(!session.input_digit('.'));
        assert!(session.input_digit('0'));
        assert_eq!(session.expression(), "10");
    }

    #[test]
    fn test_non_decimal_evaluation() {
        let mut session = SessionBuilder::new().with_base(NumeralBase::Hexadecimal).build();
        type_in(&mut session, "ff");
        assert_eq!(session.evaluate(), Ok(Some(255.0)));
        assert_eq!(session.result_display(), "FF");
        assert_eq!(session.history().get(0).map(|e| e.to_string()), Some("ff = FF".to_string()));
    }

    #[test]
    fn test_failure_shows_error_and_schedules_reset() {
        let session = failed_session();
        assert_eq!(session.result_display(), ERROR_DISPLAY);
        assert_eq!(session.expression(), "");
        assert!(session.pending_reset().is_some());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_reset_fires_only_after_delay() {
        let mut session = failed_session();
        let deadline = session.pending_reset().unwrap();
        assert!(!session.poll(deadline - Duration::from_millis(1)));
        assert_eq!(session.result_display(), ERROR_DISPLAY);
        assert!(session.poll(deadline));
        assert_eq!(session.result_display(), "0");
        assert!(session.pending_reset().is_none());
        assert!(!session.poll(deadline + Duration::from_secs(5)));
    }

    #[test]
    fn test_new_action_cancels_pending_reset() {
        let mut session = failed_session();
        session.input_digit('7');
        assert!(session.pending_reset().is_none());
        assert_eq!(session.result_display(), "0");
        assert_eq!(session.expression(), "7");
    }

    #[test]
    fn test_failure_leaves_memory_and_history_alone() {
        let mut session = Session::default();
        session.set_expression("5");
        session.evaluate().unwrap();
        session.memory_store().unwrap();

        session.set_expression("sqrt(-1)");
        assert!(session.evaluate().is_err());
        assert_eq!(session.memory().recall(), 5.0);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_failed_non_evaluate_action_keeps_buffer() {
        let mut session = Session::default();
        session.set_expression("1e30");
        session.evaluate().unwrap();
        session.set_expression("5+");

        assert!(session.set_base(NumeralBase::Binary).is_err());
        assert_eq!(session.result_display(), ERROR_DISPLAY);
        assert_eq!(session.base(), NumeralBase::Decimal);
        assert_eq!(session.expression(), "5+");

        session.set_expression("-3");
        session.evaluate().unwrap();
        session.set_expression("2*");
        assert!(session.factorial().is_err());
        assert_eq!(session.expression(), "2*");
        assert!(session.pending_reset().is_some());
    }

    #[test]
    fn test_unbounded_history_capacity() {
        let mut session = SessionBuilder::new().with_history_capacity(usize::MAX).build();
        assert_eq!(session.history().capacity(), usize::MAX);
        session.set_expression("1+2");
        assert_eq!(session.evaluate(), Ok(Some(3.0)));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_clear_entry_backspace_and_clear_all() {
        let mut session = Session::default();
        type_in(&mut session, "12+3");
        session.backspace();
        assert_eq!(session.expression(), "12+");
        session.clear_entry();
        assert_eq!(session.expression_display(), "0");

        session.set_expression("9");
        session.evaluate().unwrap();
        session.clear_all();
        assert_eq!(session.result_display(), "0");
    }

    #[test]
    fn test_factorial() {
        let mut session = Session::default();
        session.set_expression("5");
        session.evaluate().unwrap();
        session.factorial().unwrap();
        assert_eq!(session.result_display(), "120");

        session.set_expression("-3");
        session.evaluate().unwrap();
        assert!(session.factorial().is_err());
        assert_eq!(session.result_display(), ERROR_DISPLAY);

        session.set_expression("200");
        session.evaluate().unwrap();
        assert!(session.factorial().is_err());
    }

    #[test]
    fn test_set_base_rerenders_result() {
        let mut session = Session::default();
        session.set_expression("255");
        session.evaluate().unwrap();
        session.set_base(NumeralBase::Hexadecimal).unwrap();
        assert_eq!(session.result_display(), "FF");
        session.set_base(NumeralBase::Binary).unwrap();
        assert_eq!(session.result_display(), "11111111");
        assert_eq!(session.base(), NumeralBase::Binary);
    }

    #[test]
    fn test_set_base_without_result() {
        let mut session = Session::default();
        session.set_base(NumeralBase::Octal).unwrap();
        assert_eq!(session.result_display(), "0");
        assert_eq!(session.base(), NumeralBase::Octal);
    }

    #[test]
    fn test_bitwise_and_shifts() {
        let mut session = Session::default();
        session.set_expression("6");
        session.evaluate().unwrap();
        session.shift_left().unwrap();
        assert_eq!(session.result_display(), "12");
        session.shift_right().unwrap();
        session.shift_right().unwrap();
        assert_eq!(session.result_display(), "3");
        session.bitwise_not().unwrap();
        assert_eq!(session.result_display(), "-4");
    }

    #[test]
    fn test_shift_left_overflow_fails() {
        let mut session = SessionBuilder::new().with_base(NumeralBase::Hexadecimal).build();
        session.set_expression("4000000000000000");
        session.evaluate().unwrap();
        assert!(session.shift_left().is_err());
        assert_eq!(session.result_display(), ERROR_DISPLAY);
    }

    #[test]
    fn test_memory_operations() {
        let mut session = Session::default();
        session.set_expression("10");
        session.evaluate().unwrap();
        session.memory_store().unwrap();
        session.memory_add().unwrap();
        assert_eq!(session.memory_indicator(), "M: 20");
        session.memory_subtract().unwrap();
        session.memory_recall().unwrap();
        assert_eq!(session.expression(), "10");
        session.memory_clear();
        assert_eq!(session.memory_indicator(), "");
    }

    #[test]
    fn test_history_recall_and_clear() {
        let mut session = Session::default();
        session.set_expression("1+1");
        session.evaluate().unwrap();
        session.set_expression("2+2");
        session.evaluate().unwrap();

        session.recall_history(1).unwrap();
        assert_eq!(session.expression(), "1+1");
        assert!(session.recall_history(5).is_err());
        assert_eq!(session.result_display(), "4");

        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_angle_mode_affects_evaluation() {
        let mut session = Session::default();
        session.set_angle_mode(AngleMode::Radians);
        session.set_expression("cos(0");
        // balancing only applies in degree mode
        assert!(session.evaluate().is_err());

        session.set_angle_mode(AngleMode::Degrees);
        session.set_expression("cos(0");
        assert_eq!(session.evaluate(), Ok(Some(1.0)));
    }
}
