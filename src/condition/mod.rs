//! Conditions for `select`.
//!
//! A condition is a whitespace separated infix expression over attribute
//! names, literals and the operators `== != < <= > >= & |`, e.g.
//! `"1979 < year & year < 1990"` or `"studioName == 'Fox'"`. There are no
//! parentheses, precedence alone decides grouping: comparisons bind tighter
//! than `&`, which binds tighter than `|`.
//!
//! A word naming an attribute of the evaluated table stands for the tuple's
//! value, any other word is a literal parsed in the domain of the operand it
//! is compared with. Two literals compare as strings. Single quotes around
//! string and character literals are stripped.
use crate::prelude::*;

mod eval;
mod postfix;

pub use postfix::{Operator, Token};

/// Condition compiled to postfix order, ready to be evaluated against any
/// number of tuples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Condition {
    postfix: Vec<Token>,
}

impl Condition {
    /// Compiles an infix condition. Blank text compiles to a condition that
    /// holds for every tuple.
    ///
    /// # Errors
    /// Returns `Condition` if the operators and operands don't pair up.
    pub fn compile(condition: &str) -> Result<Self> {
        let postfix = postfix::to_postfix(condition);
        let mut depth = 0usize;
        for token in &postfix {
            depth = match token {
                Token::Operand(_) => depth + 1,
                Token::Operator(_) if depth >= 2 => depth - 1,
                Token::Operator(op) => {
                    return Err(Error::condition(format!(
                        "'{}' has too few operands for {}",
                        condition, op
                    )))
                }
            };
        }
        if !postfix.is_empty() && depth != 1 {
            return Err(Error::condition(format!(
                "'{}' is missing an operator",
                condition
            )));
        }
        trace!("condition '{}' compiled to {:?}", condition, postfix);
        Ok(Self { postfix })
    }

    /// Whether the condition holds for every tuple.
    pub fn is_empty(&self) -> bool {
        self.postfix.is_empty()
    }

    /// Compiled tokens.
    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    /// Evaluates the condition for `tuple` of a table with the given
    /// attribute names and domains.
    ///
    /// # Errors
    /// Fails with `Parse` when a literal doesn't fit the domain it is compared
    /// in, `DomainMismatch` when two attributes of different domains meet,
    /// and `Condition` when an operator gets operands of the wrong kind or
    /// the result is not a boolean.
    pub fn eval(&self, tuple: &[Value], attributes: &[String], domains: &[Domain]) -> Result<bool> {
        if self.is_empty() {
            return Ok(true);
        }
        eval::eval(&self.postfix, tuple, attributes, domains)
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, token) in self.postfix.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            Display::fmt(token, f)?;
        }
        Ok(())
    }
}
