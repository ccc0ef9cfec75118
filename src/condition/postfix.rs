use super::*;

/// Operators understood in conditions. No parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&`
    And,
    /// `|`
    Or,
}

impl Operator {
    /// Recognizes an operator token.
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "==" => Operator::Eq,
            "!=" => Operator::Ne,
            "<" => Operator::Lt,
            "<=" => Operator::Le,
            ">" => Operator::Gt,
            ">=" => Operator::Ge,
            "&" => Operator::And,
            "|" => Operator::Or,
            _ => return None,
        };
        Some(op)
    }

    /// Binding strength, higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Eq => 8,
            Operator::Ne => 7,
            Operator::Lt => 6,
            Operator::Le => 5,
            Operator::Gt => 4,
            Operator::Ge => 3,
            Operator::And => 2,
            Operator::Or => 1,
        }
    }

    /// Whether the operator combines booleans rather than compares scalars.
    pub const fn is_logical(self) -> bool {
        matches!(self, Operator::And | Operator::Or)
    }

    /// Token spelling.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::And => "&",
            Operator::Or => "|",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.symbol())
    }
}

/// Element of a compiled condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Attribute name or literal, told apart at evaluation time
    Operand(String),
    /// Operator applied to the two preceding results
    Operator(Operator),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Token::Operand(s) => f.write_str(s),
            Token::Operator(op) => Display::fmt(op, f),
        }
    }
}

/// Converts a whitespace separated infix condition to postfix order.
///
/// An incoming operator is stacked on top of operators of lower or equal
/// precedence, otherwise the stronger ones are emitted first.
pub(crate) fn to_postfix(condition: &str) -> Vec<Token> {
    let mut output = Vec::new();
    let mut stack: Vec<Operator> = Vec::new();
    for word in condition.split_whitespace() {
        let op = match Operator::from_token(word) {
            Some(op) => op,
            None => {
                output.push(Token::Operand(word.to_owned()));
                continue;
            }
        };
        while let Some(&top) = stack.last() {
            if top.precedence() <= op.precedence() {
                break;
            }
            output.push(Token::Operator(top));
            stack.pop();
        }
        stack.push(op);
    }
    output.extend(stack.into_iter().rev().map(Token::Operator));
    output
}
