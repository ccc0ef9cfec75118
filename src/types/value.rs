use super::*;
use std::hash::{Hash, Hasher};

/// A typed scalar value.
///
/// Values of the same variant compare by natural order (floats by
/// `total_cmp`). Use [`Value::compare`] when the operands may come from
/// different domains: it reports the mismatch instead of ordering by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// `Byte` domain
    Byte(i8),
    /// `Short` domain
    Short(i16),
    /// `Integer` domain
    Int(i32),
    /// `Long` domain
    Long(i64),
    /// `Float` domain
    Float(f32),
    /// `Double` domain
    Double(f64),
    /// `Character` domain
    Char(char),
    /// `String` domain
    Str(String),
}

impl Value {
    /// Domain the value belongs to.
    pub const fn domain(&self) -> Domain {
        match self {
            Value::Byte(_) => Domain::Byte,
            Value::Short(_) => Domain::Short,
            Value::Int(_) => Domain::Integer,
            Value::Long(_) => Domain::Long,
            Value::Float(_) => Domain::Float,
            Value::Double(_) => Domain::Double,
            Value::Char(_) => Domain::Character,
            Value::Str(_) => Domain::String,
        }
    }

    /// Compares two values of the same domain.
    pub fn compare(&self, other: &Self) -> Result<CmpOrdering> {
        self.same_domain_cmp(other).ok_or_else(|| {
            Error::domain_mismatch(format!(
                "can't compare {} with {}",
                self.domain(),
                other.domain()
            ))
        })
    }

    fn same_domain_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        let ord = match (self, other) {
            (Value::Byte(a), Value::Byte(b)) => a.cmp(b),
            (Value::Short(a), Value::Short(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Long(a), Value::Long(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::Char(a), Value::Char(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => return None,
        };
        Some(ord)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

// Values from different domains never meet inside one index, the order
// between domains only has to be total.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.same_domain_cmp(other)
            .unwrap_or_else(|| self.domain().cmp(&other.domain()))
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain().hash(state);
        match self {
            Value::Byte(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Char(v) => v.hash(state),
            Value::Str(v) => v.hash(state),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Byte(v) => Display::fmt(v, f),
            Value::Short(v) => Display::fmt(v, f),
            Value::Int(v) => Display::fmt(v, f),
            Value::Long(v) => Display::fmt(v, f),
            Value::Float(v) => Display::fmt(v, f),
            Value::Double(v) => Display::fmt(v, f),
            Value::Char(v) => Display::fmt(v, f),
            Value::Str(v) => Display::fmt(v, f),
        }
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}
