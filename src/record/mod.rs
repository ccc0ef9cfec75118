use crate::prelude::*;

mod codec;

pub use codec::{pack, slot_size, tuple_size, unpack, STRING_CAPACITY, STRING_SLOT};
