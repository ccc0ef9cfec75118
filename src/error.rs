use std::fmt::Debug;
use thiserror::Error;

/// A specialized result type for table and index operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for table, index and codec operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Input configuration is wrong
    #[error("wrong config: {0}")]
    WrongConfig(String),
    /// Value does not belong to the declared domain, or tuple arity is wrong
    #[error("domain mismatch: {0}")]
    DomainMismatch(String),
    /// Tuple could not be packed or unpacked
    #[error("codec error: {0}")]
    Codec(String),
    /// Literal or schema name could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
    /// B+Tree already holds the key
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    /// Extendible hash bucket can't be split to make room
    #[error("bucket overflow: {0}")]
    BucketOverflow(String),
    /// Condition is malformed or can't be evaluated
    #[error("condition error: {0}")]
    Condition(String),
    /// Attribute is not declared by the table
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
    /// Tables are not union compatible
    #[error("incompatible tables: {0}")]
    Incompatible(String),
    /// Join condition is malformed or refers to a non key attribute
    #[error("invalid join: {0}")]
    InvalidJoin(String),
}

/// A list specifying categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Configuration rejected at construction
    WrongConfig,
    /// Domain check failed
    DomainMismatch,
    /// Codec failure
    Codec,
    /// Parse failure
    Parse,
    /// Key conflict in the B+Tree
    DuplicateKey,
    /// Hash bucket overflow
    BucketOverflow,
    /// Malformed condition
    Condition,
    /// Attribute lookup failed
    UnknownAttribute,
    /// Union compatibility failed
    Incompatible,
    /// Join validation failed
    InvalidJoin,
}

impl Error {
    /// Returns the corresponding `Kind` for this error.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::WrongConfig(_) => Kind::WrongConfig,
            Self::DomainMismatch(_) => Kind::DomainMismatch,
            Self::Codec(_) => Kind::Codec,
            Self::Parse(_) => Kind::Parse,
            Self::DuplicateKey(_) => Kind::DuplicateKey,
            Self::BucketOverflow(_) => Kind::BucketOverflow,
            Self::Condition(_) => Kind::Condition,
            Self::UnknownAttribute(_) => Kind::UnknownAttribute,
            Self::Incompatible(_) => Kind::Incompatible,
            Self::InvalidJoin(_) => Kind::InvalidJoin,
        }
    }

    pub(crate) fn is(&self, kind: Kind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn wrong_config(message: impl Into<String>) -> Self {
        Self::WrongConfig(message.into())
    }

    pub(crate) fn domain_mismatch(message: impl Into<String>) -> Self {
        Self::DomainMismatch(message.into())
    }

    pub(crate) fn codec(message: impl Into<String>) -> Self {
        Self::Codec(message.into())
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub(crate) fn duplicate_key(key: impl Debug) -> Self {
        Self::DuplicateKey(format!("{:?}", key))
    }

    pub(crate) fn bucket_overflow(message: impl Into<String>) -> Self {
        Self::BucketOverflow(message.into())
    }

    pub(crate) fn condition(message: impl Into<String>) -> Self {
        Self::Condition(message.into())
    }

    pub(crate) fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::UnknownAttribute(name.into())
    }

    pub(crate) fn incompatible(message: impl Into<String>) -> Self {
        Self::Incompatible(message.into())
    }

    pub(crate) fn invalid_join(message: impl Into<String>) -> Self {
        Self::InvalidJoin(message.into())
    }
}
