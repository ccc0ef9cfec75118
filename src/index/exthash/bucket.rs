use super::prelude::*;

/// Stored entry with its cached hash.
#[derive(Debug, Clone)]
pub(super) struct Slot<K, V> {
    pub(super) hash: u64,
    pub(super) key: K,
    pub(super) value: V,
}

/// Fixed capacity container shared by `2^(global - local)` directory slots.
#[derive(Debug, Clone)]
pub(super) struct Bucket<K, V> {
    pub(super) local_depth: u32,
    pub(super) slots: Vec<Slot<K, V>>,
}

impl<K: PartialEq, V> Bucket<K, V> {
    pub(super) fn new(local_depth: u32, capacity: usize) -> Self {
        Self {
            local_depth,
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(super) fn is_full(&self, capacity: usize) -> bool {
        self.slots.len() >= capacity
    }

    /// First entry stored under `key`.
    pub(super) fn find(&self, hash: u64, key: &K) -> Option<&V> {
        self.slots
            .iter()
            .find(|slot| slot.hash == hash && slot.key == *key)
            .map(|slot| &slot.value)
    }
}
