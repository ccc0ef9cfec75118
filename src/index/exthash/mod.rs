use super::*;

mod bucket;
mod core;
#[cfg(test)]
mod tests;

pub use self::core::ExtHash;

mod prelude {
    pub(super) use super::*;
    pub(super) use bucket::{Bucket, Slot};
}
