use thiserror::Error;

use crate::commands::Operator;

/// Every variant collapses to the same `Error` display state; they
/// are distinguished here for tests and messages only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("expression contains disallowed character {0:?}")]
    DisallowedCharacter(char),
    #[error("expression is malformed")]
    MalformedExpression,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFiniteResult,
}

#[derive(Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

/// A number token is a maximal run of digits and dots. Forms like
/// `.5` and `1.` are fine (the buffer can legitimately hold them),
/// while a run like `1.2.3` fails the parse and the whole
/// expression is rejected.
fn tokenize(expression: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = vec![];
    let mut chars = expression.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch == ' ' {
            chars.next();
        } else if ch.is_ascii_digit() || ch == '.' {
            let mut number = String::new();
            while let Some(&digit_or_dot) = chars.peek() {
                if digit_or_dot.is_ascii_digit() || digit_or_dot == '.' {
                    number.push(digit_or_dot);
                    chars.next();
                } else {
                    break;
                }
            }

            let value = number
                .parse()
                .map_err(|_| EvalError::MalformedExpression)?;
            tokens.push(Token::Number(value));
        } else if let Some(operator) = Operator::from_char(ch) {
            tokens.push(Token::Operator(operator));
            chars.next();
        } else if ch == '(' {
            tokens.push(Token::LeftParen);
            chars.next();
        } else if ch == ')' {
            tokens.push(Token::RightParen);
            chars.next();
        } else {
            return Err(EvalError::DisallowedCharacter(ch));
        }
    }

    Ok(tokens)
}

/// Recursive descent over the usual grammar:
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := ('-' | '+') factor | number | '(' expression ')'
/// ```
///
/// Values are computed while parsing; there is no AST to walk
/// afterwards. Unary minus is not optional sugar here: sign
/// toggling routinely produces buffers like `5*-3` and `5--3`.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos = self.pos.saturating_add(1);
        }
        token
    }

    fn parse_expression(&mut self) -> Result<f64, EvalError> {
        let mut value = self.parse_term()?;

        while let Some(Token::Operator(operator)) = self.peek() {
            if !matches!(operator, Operator::Add | Operator::Subtract) {
                break;
            }
            self.advance();

            let rhs = self.parse_term()?;
            value = if matches!(operator, Operator::Add) {
                value + rhs
            } else {
                value - rhs
            };
        }

        Ok(value)
    }

    fn parse_term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.parse_factor()?;

        while let Some(Token::Operator(operator)) = self.peek() {
            if !matches!(operator, Operator::Multiply | Operator::Divide) {
                break;
            }
            self.advance();

            let rhs = self.parse_factor()?;
            if matches!(operator, Operator::Multiply) {
                value *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                value /= rhs;
            }
        }

        Ok(value)
    }

    fn parse_factor(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Operator(Operator::Subtract)) => Ok(-self.parse_factor()?),
            Some(Token::Operator(Operator::Add)) => self.parse_factor(),
            Some(Token::LeftParen) => {
                let value = self.parse_expression()?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(value),
                    _ => Err(EvalError::MalformedExpression),
                }
            }
            _ => Err(EvalError::MalformedExpression),
        }
    }
}

pub fn evaluate<T: AsRef<str>>(expression: T) -> Result<f64, EvalError> {
    let tokens = tokenize(expression.as_ref())?;
    if tokens.is_empty() {
        return Err(EvalError::MalformedExpression);
    }

    let mut parser = Parser::new(tokens);
    let value = parser.parse_expression()?;

    // leftover tokens mean the grammar only matched a prefix,
    // e.g. `2 3` or `2)`
    if parser.peek().is_some() {
        return Err(EvalError::MalformedExpression);
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFiniteResult)
    }
}

/// Whole values render without a fractional part; everything else
/// is rounded to 10 decimal digits and trailing zeros trimmed.
/// This is also the canonical "shortest text" form the editor
/// splices back into the buffer when a number is rewritten.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::as_conversions)]
        let whole = value as i64;
        format!("{whole}")
    } else {
        let formatted = format!("{value:.10}");
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_numbers() {
        assert_eq!(evaluate("7"), Ok(7.0));
        assert_eq!(evaluate("42"), Ok(42.0));
        assert_eq!(evaluate("3.25"), Ok(3.25));

        // forms the buffer can legitimately hold
        assert_eq!(evaluate(".5"), Ok(0.5));
        assert_eq!(evaluate("1."), Ok(1.0));
        assert_eq!(evaluate("-5"), Ok(-5.0));
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("2+2"), Ok(4.0));
        assert_eq!(evaluate("10/4"), Ok(2.5));
        assert_eq!(evaluate("7*3"), Ok(21.0));
        assert_eq!(evaluate("9-12"), Ok(-3.0));
    }

    #[test]
    fn test_precedence_and_associativity() {
        // multiplication binds tighter
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("2*3+4"), Ok(10.0));

        // same precedence runs left to right
        assert_eq!(evaluate("8/4/2"), Ok(1.0));
        assert_eq!(evaluate("10-3-4"), Ok(3.0));
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("((1))"), Ok(1.0));
        assert_eq!(evaluate("2*(3+(4-1))"), Ok(12.0));
    }

    #[test]
    fn test_unary_signs() {
        // shapes produced by sign toggling
        assert_eq!(evaluate("5*-3"), Ok(-15.0));
        assert_eq!(evaluate("5--3"), Ok(8.0));
        assert_eq!(evaluate("5+-3"), Ok(2.0));
        assert_eq!(evaluate("--5"), Ok(5.0));
        assert_eq!(evaluate("+5"), Ok(5.0));
        assert_eq!(evaluate("-(2+3)"), Ok(-5.0));
    }

    #[test]
    fn test_spaces_are_ignored() {
        assert_eq!(evaluate(" 2 + 2 "), Ok(4.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("6/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("0/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("1/0.0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("1/(2-2)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_malformed_expressions() {
        assert_eq!(evaluate(""), Err(EvalError::MalformedExpression));
        assert_eq!(evaluate("5+"), Err(EvalError::MalformedExpression));
        assert_eq!(evaluate("."), Err(EvalError::MalformedExpression));
        assert_eq!(evaluate("1.2.3"), Err(EvalError::MalformedExpression));
        assert_eq!(evaluate("()"), Err(EvalError::MalformedExpression));
        assert_eq!(evaluate("(2+3"), Err(EvalError::MalformedExpression));
        assert_eq!(evaluate("2 3"), Err(EvalError::MalformedExpression));
        assert_eq!(evaluate("2)"), Err(EvalError::MalformedExpression));
    }

    #[test]
    fn test_disallowed_characters() {
        assert_eq!(evaluate("2+a"), Err(EvalError::DisallowedCharacter('a')));
        assert_eq!(evaluate("50%"), Err(EvalError::DisallowedCharacter('%')));
        assert_eq!(evaluate("2^3"), Err(EvalError::DisallowedCharacter('^')));
    }

    #[test]
    fn test_format_number() {
        // whole values lose the fractional part
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-15.0), "-15");
        assert_eq!(format_number(-0.0), "0");

        // fractional values are trimmed, not zero padded
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");

        // rounded to 10 decimal digits
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
    }

    #[test]
    fn test_format_round_trips_through_evaluate() {
        assert_eq!(format_number(evaluate("2+2").expect("evaluates")), "4");
        assert_eq!(format_number(evaluate("10/4").expect("evaluates")), "2.5");
    }
}
