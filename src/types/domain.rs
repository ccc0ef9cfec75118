use super::*;

/// Declared scalar kind of a table attribute.
///
/// Names follow the schema strings tables are declared with, e.g.
/// `"String Integer Integer String String Integer"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Single character
    Character,
    /// Bounded length string
    String,
}

impl Domain {
    /// Every domain, in declaration order.
    pub const ALL: [Domain; 8] = [
        Domain::Byte,
        Domain::Short,
        Domain::Integer,
        Domain::Long,
        Domain::Float,
        Domain::Double,
        Domain::Character,
        Domain::String,
    ];

    /// Resolves a domain by its schema name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name() == name)
            .ok_or_else(|| Error::parse(format!("unknown domain name: {}", name)))
    }

    /// Schema name of the domain.
    pub const fn name(&self) -> &'static str {
        match self {
            Domain::Byte => "Byte",
            Domain::Short => "Short",
            Domain::Integer => "Integer",
            Domain::Long => "Long",
            Domain::Float => "Float",
            Domain::Double => "Double",
            Domain::Character => "Character",
            Domain::String => "String",
        }
    }

    /// Whether values of the domain are numbers.
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, Domain::Character | Domain::String)
    }

    /// Parses a condition literal into a value of this domain.
    ///
    /// Single quotes are stripped for `String` and `Character`, numeric
    /// domains parse with their exact width.
    pub fn parse_literal(&self, token: &str) -> Result<Value> {
        let fail = |e: &dyn Display| {
            Error::parse(format!("'{}' is not a valid {}: {}", token, self, e))
        };
        let value = match self {
            Domain::Byte => Value::Byte(token.parse().map_err(|e| fail(&e))?),
            Domain::Short => Value::Short(token.parse().map_err(|e| fail(&e))?),
            Domain::Integer => Value::Int(token.parse().map_err(|e| fail(&e))?),
            Domain::Long => Value::Long(token.parse().map_err(|e| fail(&e))?),
            Domain::Float => Value::Float(token.parse().map_err(|e| fail(&e))?),
            Domain::Double => Value::Double(token.parse().map_err(|e| fail(&e))?),
            Domain::Character => {
                let stripped = strip_quotes(token);
                let mut chars = stripped.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::Char(c),
                    _ => return Err(fail(&"expected exactly one character")),
                }
            }
            Domain::String => Value::Str(strip_quotes(token)),
        };
        Ok(value)
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Parses a whitespace separated list of domain names.
pub fn parse_domains(names: &str) -> Result<Vec<Domain>> {
    names.split_whitespace().map(Domain::from_name).collect()
}

fn strip_quotes(token: &str) -> String {
    token.replace('\'', "")
}
