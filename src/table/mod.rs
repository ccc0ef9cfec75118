mod builder;
mod config;
mod core;
mod display;
mod ops;

pub use self::{builder::Builder, core::Table};

mod prelude {
    pub(crate) use {
        super::{config::Config, core::Table},
        crate::{
            condition::Condition,
            index::{Index, IndexConfig, IndexKind},
            prelude::*,
            types::type_check,
        },
    };
}
