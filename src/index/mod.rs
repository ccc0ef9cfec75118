use crate::prelude::*;
use std::hash::Hash;
use std::str::FromStr;

mod bptree;
mod exthash;
mod tree_map;

pub use self::{bptree::BpTree, exthash::ExtHash, tree_map::TreeMapIndex};

/// Map contract shared by every index a table can be built on.
pub trait Index<K, V>: Debug {
    /// Value stored under `key`, if any.
    fn get(&self, key: &K) -> Option<&V>;

    /// Stores `value` under `key`.
    ///
    /// What happens to an already present key depends on the structure:
    /// [`TreeMapIndex`] overwrites and returns the previous value,
    /// [`BpTree`] fails with `DuplicateKey`, [`ExtHash`] keeps both entries.
    fn put(&mut self, key: K, value: V) -> Result<Option<V>>;

    /// Whether `get(key)` would find a value.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Size as reported by the structure. For [`ExtHash`] this is the slot
    /// capacity, not the number of entries.
    fn size(&self) -> usize;

    /// Every stored entry. Ordered indexes yield ascending key order.
    fn entries(&self) -> Vec<(&K, &V)>;
}

/// Range queries over an index that keeps its keys sorted.
pub trait OrderedIndex<K, V>: Index<K, V> {
    /// Smallest key.
    fn first_key(&self) -> Option<&K>;
    /// Largest key.
    fn last_key(&self) -> Option<&K>;
    /// Entries with keys strictly less than `to`.
    fn head_map(&self, to: &K) -> BTreeMap<K, V>;
    /// Entries with keys greater than or equal to `from`.
    fn tail_map(&self, from: &K) -> BTreeMap<K, V>;
    /// Entries with keys in `[from, to)`, empty when `from >= to`.
    fn sub_map(&self, from: &K, to: &K) -> BTreeMap<K, V>;
}

/// Index structure a table is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// Balanced tree from the standard library
    TreeMap,
    /// Arena based B+Tree
    BpTree,
    /// Extendible hash table
    ExtHash,
}

impl Default for IndexKind {
    fn default() -> Self {
        IndexKind::TreeMap
    }
}

impl FromStr for IndexKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "treemap" | "tree_map" => Ok(IndexKind::TreeMap),
            "bptree" | "bp_tree" => Ok(IndexKind::BpTree),
            "exthash" | "ext_hash" => Ok(IndexKind::ExtHash),
            _ => Err(Error::parse(format!("unknown index kind: {}", s))),
        }
    }
}

/// Index structure selection and its tuning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Structure to build
    pub kind: IndexKind,
    /// Max children per B+Tree node, a node holds at most `order - 1` keys
    pub bptree_order: usize,
    /// Bucket count the extendible hash starts with, must be a power of two
    pub hash_initial_buckets: usize,
    /// Entries per extendible hash bucket
    pub hash_slots: usize,
    /// Upper bound for the extendible hash directory depth
    pub hash_max_global_depth: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            kind: IndexKind::default(),
            bptree_order: 5,
            hash_initial_buckets: 2,
            hash_slots: 4,
            hash_max_global_depth: 24,
        }
    }
}

impl IndexConfig {
    /// Default parameters for the given structure.
    pub fn with_kind(kind: IndexKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Builds an empty index of the configured kind.
    ///
    /// # Errors
    /// Returns `WrongConfig` if a parameter is rejected by the structure.
    pub fn build<K, V>(&self) -> Result<Box<dyn Index<K, V>>>
    where
        K: Ord + Hash + Clone + Debug + 'static,
        V: Clone + Debug + 'static,
    {
        let index: Box<dyn Index<K, V>> = match self.kind {
            IndexKind::TreeMap => Box::new(TreeMapIndex::new()),
            IndexKind::BpTree => Box::new(BpTree::with_order(self.bptree_order)?),
            IndexKind::ExtHash => Box::new(ExtHash::with_params(
                self.hash_initial_buckets,
                self.hash_slots,
                self.hash_max_global_depth,
            )?),
        };
        debug!("{:?} index created", self.kind);
        Ok(index)
    }
}
