use std::cell::RefCell;

use regex::Regex;

use crate::{
    commands::{CalculatorCommand, Operator},
    eval::{self, format_number},
};

/// Sentinel shown in place of the buffer after a failed evaluation.
const ERROR_DISPLAY: &str = "Error";

thread_local! {
    static NUMBER_REGEX: RefCell<Regex> =
        RefCell::new(Regex::new(r"\d*\.?\d+").expect("valid regex expression"));
}

/// The expression under construction: one mutable text buffer that
/// every key press operates on, plus a flag for showing the error
/// sentinel after a failed evaluation.
///
/// The flag clears on exactly the operations that repaint the
/// buffer; operations that bail out early (an ignored operator on
/// an empty buffer, a second decimal point) leave the sentinel
/// visible.
pub struct Expression {
    text: String,
    show_error: bool,
}

impl Expression {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            show_error: false,
        }
    }

    /// The raw buffer, exactly as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// What the display surface should show: the buffer, or the
    /// error sentinel until the next edit repaints it.
    pub fn display(&self) -> &str {
        if self.show_error {
            ERROR_DISPLAY
        } else {
            &self.text
        }
    }

    pub fn has_error(&self) -> bool {
        self.show_error
    }

    pub fn push_digit(&mut self, digit: char) {
        self.text.push(digit);
        self.show_error = false;
    }

    /// An operator replaces a trailing operator instead of stacking
    /// behind it, so the buffer never holds two operators in a row.
    /// On an empty buffer only `-` means anything (unary minus);
    /// the other operators are dropped.
    pub fn push_operator(&mut self, operator: Operator) {
        if self.text.is_empty() {
            if matches!(operator, Operator::Subtract) {
                self.text.push('-');
                self.show_error = false;
            }
            return;
        }

        let trailing_operator = self
            .text
            .chars()
            .next_back()
            .and_then(Operator::from_char)
            .is_some();
        if trailing_operator {
            self.text.pop();
        }

        self.text.push(operator.as_char());
        self.show_error = false;
    }

    /// At most one decimal point per number: the segment of the
    /// buffer after the last operator.
    pub fn push_decimal(&mut self) {
        let last_segment = self
            .text
            .rsplit(['+', '-', '*', '/'])
            .next()
            .unwrap_or("");
        if last_segment.contains('.') {
            return;
        }

        self.text.push('.');
        self.show_error = false;
    }

    pub fn backspace(&mut self) {
        self.text.pop();
        self.show_error = false;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.show_error = false;
    }

    pub fn toggle_sign(&mut self) {
        self.map_trailing_number(|value| -value);
    }

    pub fn percent(&mut self) {
        self.map_trailing_number(|value| value / 100.0);
    }

    /// Evaluation failures never escape to the caller: the buffer
    /// resets and the display shows the error sentinel instead.
    pub fn evaluate(&mut self) {
        match eval::evaluate(&self.text) {
            Ok(value) => {
                self.text = format_number(value);
                self.show_error = false;
            }
            Err(..) => {
                self.text.clear();
                self.show_error = true;
            }
        }
    }

    /// Returns whether the command was handled; quitting is the
    /// application's business, not the buffer's.
    pub fn execute_command(&mut self, command: CalculatorCommand) -> bool {
        match command {
            CalculatorCommand::InsertDigit(digit) => {
                self.push_digit(digit);
                true
            }
            CalculatorCommand::InsertOperator(operator) => {
                self.push_operator(operator);
                true
            }
            CalculatorCommand::InsertDecimalPoint => {
                self.push_decimal();
                true
            }
            CalculatorCommand::EraseLastCharacter => {
                self.backspace();
                true
            }
            CalculatorCommand::ClearAll => {
                self.clear();
                true
            }
            CalculatorCommand::ToggleSign => {
                self.toggle_sign();
                true
            }
            CalculatorCommand::ApplyPercent => {
                self.percent();
                true
            }
            CalculatorCommand::Evaluate => {
                self.evaluate();
                true
            }
            CalculatorCommand::QuitAll => false,
        }
    }

    /// Applies `f` to the number most recently typed and splices the
    /// result back over the same span. The regex finds an unsigned
    /// number; a `-` directly in front of it is taken along when it
    /// is unary (start of buffer, or right behind another operator
    /// or `(`). Without that, toggling a negated number would stack
    /// another sign in front instead of flipping it back.
    fn map_trailing_number<F: Fn(f64) -> f64>(&mut self, f: F) {
        let span = NUMBER_REGEX.with_borrow(|regex| {
            regex
                .find_iter(&self.text)
                .last()
                .map(|number| (number.start(), number.end()))
        });

        let Some((start, end)) = span else {
            return;
        };

        let start = if self.has_unary_minus_before(start) {
            start.saturating_sub(1)
        } else {
            start
        };

        let Some(value) = self
            .text
            .get(start..end)
            .and_then(|number| number.parse::<f64>().ok())
        else {
            return;
        };

        let replacement = format_number(f(value));
        self.text.replace_range(start..end, &replacement);
        self.show_error = false;
    }

    fn has_unary_minus_before(&self, start: usize) -> bool {
        if !self.text[..start].ends_with('-') {
            return false;
        }

        match self.text[..start.saturating_sub(1)].chars().next_back() {
            None => true,
            Some(ch) => Operator::from_char(ch).is_some() || ch == '(',
        }
    }
}
