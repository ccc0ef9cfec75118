mod generator;
/// SQL text emitters
pub mod sql;

pub use generator::{ForeignKey, TupleGenerator};

pub(crate) mod prelude {
    pub(crate) use crate::prelude::*;
    pub(crate) use rand::Rng;
}
