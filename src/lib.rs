#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

//! # tabula
//!
//! The `tabula` crate provides a minimal in-memory relational storage engine:
//! tables with relational algebra operators (project, select, union, minus,
//! join, insert) backed by a pluggable index, plus two self-contained index
//! structures, a B+Tree and an extendible hash table, and a fixed-width tuple
//! codec.
//!
//! # Examples
//!
//! ```
//! use tabula::{Builder, IndexKind, Value};
//!
//! let mut movie = Builder::new()
//!     .name("movie")
//!     .attributes("title year")
//!     .domains("String Integer")
//!     .key("title")
//!     .index(IndexKind::BpTree)
//!     .build()
//!     .unwrap();
//! movie
//!     .insert(vec![Value::Str("Star_Wars".into()), Value::Int(1977)])
//!     .unwrap();
//! let old = movie.select("year < 1980").unwrap();
//! assert_eq!(old.tuple_count(), 1);
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod error;

/// Condition compilation and evaluation for `select`
pub mod condition;
/// Index structures and the map contracts tables depend on
pub mod index;
/// Fixed-width tuple codec
pub mod record;
/// Relational tables
pub mod table;
/// Tuple generation and SQL text emitters
pub mod tools;
/// Scalar values, domains and composite keys
pub mod types;

pub use condition::Condition;
pub use error::{Error, Kind, Result};
pub use index::{BpTree, ExtHash, Index, IndexConfig, IndexKind, OrderedIndex, TreeMapIndex};
pub use record::{pack, tuple_size, unpack};
pub use table::{Builder, Table};
pub use types::{Domain, Key, Tuple, Value};

mod prelude {
    pub(crate) use crate::{
        error::{Error, Kind, Result},
        types::{Domain, Key, Tuple, Value},
    };
    pub(crate) use std::{
        cmp::Ordering as CmpOrdering,
        collections::{BTreeMap, HashSet},
        fmt::{Debug, Display, Formatter, Result as FmtResult},
    };
}
