use super::*;

/// Evaluation stack entry.
///
/// Literals stay unparsed until they meet the operand they are compared
/// with, which decides their domain.
#[derive(Debug)]
enum Operand<'a> {
    Attribute(&'a Value),
    Literal(&'a str),
    Bool(bool),
}

impl Operand<'_> {
    fn describe(&self) -> String {
        match self {
            Operand::Attribute(v) => format!("{:?}", v),
            Operand::Literal(s) => format!("literal {}", s),
            Operand::Bool(b) => format!("boolean {}", b),
        }
    }
}

/// Runs `postfix` against a single tuple.
pub(super) fn eval(
    postfix: &[Token],
    tuple: &[Value],
    attributes: &[String],
    domains: &[Domain],
) -> Result<bool> {
    if tuple.len() != attributes.len() || attributes.len() != domains.len() {
        return Err(Error::domain_mismatch(format!(
            "tuple of {} values checked against {} attributes and {} domains",
            tuple.len(),
            attributes.len(),
            domains.len()
        )));
    }
    let mut stack: Vec<Operand<'_>> = Vec::with_capacity(postfix.len());
    for token in postfix {
        match token {
            Token::Operand(word) => {
                let operand = match attributes.iter().position(|a| a == word) {
                    Some(pos) => Operand::Attribute(&tuple[pos]),
                    None => Operand::Literal(word),
                };
                stack.push(operand);
            }
            Token::Operator(op) => {
                let (right, left) = match (stack.pop(), stack.pop()) {
                    (Some(right), Some(left)) => (right, left),
                    _ => {
                        return Err(Error::condition(format!(
                            "operator {} lacks operands",
                            op
                        )))
                    }
                };
                stack.push(Operand::Bool(apply(*op, left, right)?));
            }
        }
    }
    match stack.as_slice() {
        [Operand::Bool(result)] => Ok(*result),
        [other] => Err(Error::condition(format!(
            "condition yields {} instead of a boolean",
            other.describe()
        ))),
        _ => Err(Error::condition(format!(
            "condition leaves {} values on the stack",
            stack.len()
        ))),
    }
}

fn apply(op: Operator, left: Operand<'_>, right: Operand<'_>) -> Result<bool> {
    if op.is_logical() {
        return match (left, right) {
            (Operand::Bool(a), Operand::Bool(b)) => Ok(match op {
                Operator::And => a && b,
                _ => a || b,
            }),
            (a, b) => Err(Error::condition(format!(
                "{} needs boolean operands, got {} and {}",
                op,
                a.describe(),
                b.describe()
            ))),
        };
    }
    let ordering = compare(op, &left, &right)?;
    let holds = match op {
        Operator::Eq => ordering == CmpOrdering::Equal,
        Operator::Ne => ordering != CmpOrdering::Equal,
        Operator::Lt => ordering == CmpOrdering::Less,
        Operator::Le => ordering != CmpOrdering::Greater,
        Operator::Gt => ordering == CmpOrdering::Greater,
        _ => ordering != CmpOrdering::Less,
    };
    Ok(holds)
}

fn compare(op: Operator, left: &Operand<'_>, right: &Operand<'_>) -> Result<CmpOrdering> {
    match (left, right) {
        (Operand::Attribute(a), Operand::Attribute(b)) => a.compare(b),
        (Operand::Attribute(a), Operand::Literal(s)) => a.compare(&a.domain().parse_literal(s)?),
        (Operand::Literal(s), Operand::Attribute(b)) => b.domain().parse_literal(s)?.compare(b),
        (Operand::Literal(a), Operand::Literal(b)) => {
            let a = Domain::String.parse_literal(a)?;
            a.compare(&Domain::String.parse_literal(b)?)
        }
        (a, b) => Err(Error::condition(format!(
            "{} can't compare {} with {}",
            op,
            a.describe(),
            b.describe()
        ))),
    }
}
