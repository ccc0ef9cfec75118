use super::*;

mod core;
mod node;

pub use self::core::BpTree;

mod prelude {
    pub(super) use super::*;
    pub(super) use node::{Node, NodeId, NodeKind};
}
