use super::*;

/// Composite primary key: values projected from a tuple's key columns.
///
/// Keys order lexicographically by component, equal keys hash identically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Key(Vec<Value>);

impl Key {
    /// Creates key from its components.
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Projects the listed attribute positions of `tuple` into a key,
    /// preserving order.
    pub fn from_tuple(tuple: &[Value], positions: &[usize]) -> Result<Self> {
        positions
            .iter()
            .map(|&pos| {
                tuple.get(pos).cloned().ok_or_else(|| {
                    Error::domain_mismatch(format!(
                        "key column {} is out of tuple bounds ({})",
                        pos,
                        tuple.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Components of the key.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for Key {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str(")")
    }
}
