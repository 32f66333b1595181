// Copyright (c) 2025-2026 Freja Contributors
//
// SPDX-License-Identifier: MIT
//! Safe arithmetic evaluation for model-supplied expressions.
//!
//! A hand-written tokenizer and recursive-descent parser over a closed
//! grammar: numbers, `+ - * / **`, parentheses, and unary minus.  Nothing
//! else tokenizes, so identifiers, calls, and indexing are rejected at the
//! first character — the expression never reaches any general-purpose
//! evaluator.
//!
//! Precedence and associativity follow the usual mathematical convention:
//! `**` binds tighter than unary minus (`-2**2 == -4`) and associates to
//! the right (`2**3**2 == 512`).  Division is true division over `f64`.

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CalcError {
    /// The expression contains syntax outside the supported grammar.
    #[error("unsupported expression: {0}")]
    Unsupported(String),

    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Pow,
    LParen,
    RParen,
}

/// Evaluate `expr` and return the numeric result.
pub fn evaluate(expr: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(CalcError::Unsupported("empty expression".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(CalcError::Unsupported(
            "trailing input after expression".to_string(),
        ));
    }
    Ok(value)
}

/// Render a result the way a calculator would: integral values without a
/// trailing `.0`, everything else in the shortest `f64` form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut lit = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        lit.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let num = lit
                    .parse::<f64>()
                    .map_err(|_| CalcError::Unsupported(format!("bad number literal '{lit}'")))?;
                tokens.push(Token::Num(num));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::Pow);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => {
                return Err(CalcError::Unsupported(format!(
                    "unexpected character '{other}'"
                )));
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Result<Token, CalcError> {
        let tok = self
            .peek()
            .ok_or_else(|| CalcError::Unsupported("unexpected end of expression".to_string()))?;
        self.pos += 1;
        Ok(tok)
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = match op {
                Token::Plus => value + rhs,
                _ => value - rhs,
            };
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                Token::Star => value * rhs,
                _ => {
                    if rhs == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value / rhs
                }
            };
        }
        Ok(value)
    }

    // unary := '-' unary | power
    //
    // Unary minus sits above power so that -2**2 parses as -(2**2).
    fn unary(&mut self) -> Result<f64, CalcError> {
        if self.peek() == Some(Token::Minus) {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.power()
    }

    // power := atom ('**' unary)?   (right-associative via the recursion)
    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.atom()?;
        if self.peek() == Some(Token::Pow) {
            self.pos += 1;
            let exp = self.unary()?;
            return Ok(base.powf(exp));
        }
        Ok(base)
    }

    // atom := number | '(' expr ')'
    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.advance()? {
            Token::Num(n) => Ok(n),
            Token::LParen => {
                let value = self.expr()?;
                if self.advance()? != Token::RParen {
                    return Err(CalcError::Unsupported(
                        "expected closing parenthesis".to_string(),
                    ));
                }
                Ok(value)
            }
            other => Err(CalcError::Unsupported(format!(
                "unexpected token {other:?}"
            ))),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_precedence() {
        assert_eq!(evaluate("1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(evaluate("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
    }

    #[test]
    fn division_is_true_division() {
        assert_eq!(evaluate("7 / 2").unwrap(), 3.5);
    }

    #[test]
    fn division_by_zero_is_rejected() {
        assert_eq!(evaluate("1 / 0").unwrap_err(), CalcError::DivisionByZero);
        assert_eq!(evaluate("5 / (2 - 2)").unwrap_err(), CalcError::DivisionByZero);
    }

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        assert_eq!(evaluate("-2**2").unwrap(), -4.0);
        assert_eq!(evaluate("(-2)**2").unwrap(), 4.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(evaluate("2**3**2").unwrap(), 512.0);
        assert_eq!(evaluate("2 ** 10").unwrap(), 1024.0);
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(evaluate("2**-1").unwrap(), 0.5);
    }

    #[test]
    fn stacked_unary_minus() {
        assert_eq!(evaluate("--2").unwrap(), 2.0);
        assert_eq!(evaluate("-(-3)").unwrap(), 3.0);
    }

    #[test]
    fn decimals_parse() {
        assert_eq!(evaluate("0.5 + .25").unwrap(), 0.75);
    }

    #[test]
    fn identifiers_and_calls_are_unsupported() {
        assert!(matches!(
            evaluate("__import__('os')"),
            Err(CalcError::Unsupported(_))
        ));
        assert!(matches!(evaluate("abs(-1)"), Err(CalcError::Unsupported(_))));
        assert!(matches!(evaluate("1 + x"), Err(CalcError::Unsupported(_))));
    }

    #[test]
    fn malformed_expressions_are_unsupported() {
        assert!(matches!(evaluate(""), Err(CalcError::Unsupported(_))));
        assert!(matches!(evaluate("   "), Err(CalcError::Unsupported(_))));
        assert!(matches!(evaluate("1 +"), Err(CalcError::Unsupported(_))));
        assert!(matches!(evaluate("1 2"), Err(CalcError::Unsupported(_))));
        assert!(matches!(evaluate("(1 + 2"), Err(CalcError::Unsupported(_))));
        assert!(matches!(evaluate("1..2"), Err(CalcError::Unsupported(_))));
    }

    #[test]
    fn integral_results_format_without_fraction() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.5), "0.5");
    }
}
