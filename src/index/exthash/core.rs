use super::prelude::*;
use ahash::RandomState;
use std::collections::VecDeque;
use std::hash::{BuildHasher, Hasher};

const DEFAULT_INITIAL_BUCKETS: usize = 2;
const DEFAULT_SLOTS: usize = 4;
const DEFAULT_MAX_GLOBAL_DEPTH: u32 = 24;
const MAX_GLOBAL_DEPTH_LIMIT: u32 = 48;
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Extendible hash table.
///
/// A directory of `2^global_depth` slots points into a pool of fixed
/// capacity buckets, bucket of local depth `l` is referenced by every slot
/// whose low `l` bits match. A full bucket splits on the next hash bit, the
/// directory doubles when the splitting bucket is as deep as the directory.
///
/// Keys are not required to be unique, `put` on a present key appends one
/// more entry and `get` returns the oldest. Hashes are seeded with fixed
/// keys, so bucket layout is reproducible between runs.
#[derive(Debug, Clone)]
pub struct ExtHash<K, V> {
    directory: Vec<usize>,
    buckets: Vec<Bucket<K, V>>,
    global_depth: u32,
    slots: usize,
    max_global_depth: u32,
}

impl<K, V> Default for ExtHash<K, V>
where
    K: Hash + Eq + Debug,
    V: Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ExtHash<K, V>
where
    K: Hash + Eq + Debug,
    V: Debug,
{
    /// Creates table with 2 buckets of 4 slots.
    pub fn new() -> Self {
        Self::layout(
            DEFAULT_INITIAL_BUCKETS,
            DEFAULT_SLOTS,
            DEFAULT_MAX_GLOBAL_DEPTH,
        )
    }

    /// Creates table with `initial_buckets` buckets of 4 slots.
    ///
    /// # Errors
    /// Returns `WrongConfig` unless `initial_buckets` is a power of two.
    pub fn with_buckets(initial_buckets: usize) -> Result<Self> {
        Self::with_params(initial_buckets, DEFAULT_SLOTS, DEFAULT_MAX_GLOBAL_DEPTH)
    }

    /// Creates table with full control over the layout.
    ///
    /// # Errors
    /// Returns `WrongConfig` if `initial_buckets` is not a power of two,
    /// `slots` is zero, or the initial directory is already deeper than
    /// `max_global_depth`.
    pub fn with_params(initial_buckets: usize, slots: usize, max_global_depth: u32) -> Result<Self> {
        if !initial_buckets.is_power_of_two() {
            return Err(Error::wrong_config(format!(
                "initial bucket count must be a power of two, got {}",
                initial_buckets
            )));
        }
        if slots == 0 {
            return Err(Error::wrong_config("bucket must have at least one slot"));
        }
        if max_global_depth > MAX_GLOBAL_DEPTH_LIMIT {
            return Err(Error::wrong_config(format!(
                "max global depth {} exceeds {}",
                max_global_depth, MAX_GLOBAL_DEPTH_LIMIT
            )));
        }
        if initial_buckets.trailing_zeros() > max_global_depth {
            return Err(Error::wrong_config(format!(
                "{} initial buckets need a deeper directory than {}",
                initial_buckets, max_global_depth
            )));
        }
        Ok(Self::layout(initial_buckets, slots, max_global_depth))
    }

    fn layout(initial_buckets: usize, slots: usize, max_global_depth: u32) -> Self {
        let global_depth = initial_buckets.trailing_zeros();
        Self {
            directory: (0..initial_buckets).collect(),
            buckets: (0..initial_buckets)
                .map(|_| Bucket::new(global_depth, slots))
                .collect(),
            global_depth,
            slots,
            max_global_depth,
        }
    }

    /// Number of hash bits the directory is indexed by.
    pub fn global_depth(&self) -> u32 {
        self.global_depth
    }

    /// Number of distinct buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Capacity of a single bucket.
    pub fn slots_per_bucket(&self) -> usize {
        self.slots
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.len()).sum()
    }

    /// Whether no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an entry, splitting buckets as needed.
    ///
    /// # Errors
    /// Returns `BucketOverflow` if the target bucket is full and its entries
    /// can't be told apart within the directory depth limit, e.g. more than
    /// a bucket's worth of entries under one key. Nothing is changed then.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let hash = hash_of(&key);
        let id = self.bucket_of(hash);
        if self.buckets[id].is_full(self.slots) {
            self.check_splittable(id, hash)?;
        }
        self.place(Slot { hash, key, value });
        Ok(())
    }

    /// Every entry, bucket by bucket.
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|b| b.slots.iter().map(|s| (&s.key, &s.value)))
            .collect()
    }

    /// Validates directory and bucket invariants: each bucket of local depth
    /// `l` is referenced by exactly `2^(global - l)` slots and every entry
    /// sits in the bucket its hash points to.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.directory.len() != 1 << self.global_depth {
            return Err(format!(
                "directory has {} slots at global depth {}",
                self.directory.len(),
                self.global_depth
            ));
        }
        if let Some(bad) = self.directory.iter().find(|&&id| id >= self.buckets.len()) {
            return Err(format!("directory points to missing bucket {}", bad));
        }
        for (id, bucket) in self.buckets.iter().enumerate() {
            if bucket.local_depth > self.global_depth {
                return Err(format!(
                    "bucket {} local depth {} exceeds global depth {}",
                    id, bucket.local_depth, self.global_depth
                ));
            }
            let refs = self.directory.iter().filter(|&&b| b == id).count();
            let expected = 1 << (self.global_depth - bucket.local_depth);
            if refs != expected {
                return Err(format!(
                    "bucket {} is referenced {} times, expected {}",
                    id, refs, expected
                ));
            }
            if bucket.slots.len() > self.slots {
                return Err(format!("bucket {} holds {} entries", id, bucket.slots.len()));
            }
            if let Some(slot) = bucket.slots.iter().find(|s| self.bucket_of(s.hash) != id) {
                return Err(format!("entry {:?} is stored in a foreign bucket {}", slot.key, id));
            }
        }
        Ok(())
    }

    fn mask(&self) -> u64 {
        (1 << self.global_depth) - 1
    }

    fn bucket_of(&self, hash: u64) -> usize {
        self.directory[(hash & self.mask()) as usize]
    }

    fn check_splittable(&self, id: usize, hash: u64) -> Result<()> {
        let diff = self.buckets[id]
            .slots
            .iter()
            .fold(0, |acc, slot| acc | (slot.hash ^ hash));
        if diff == 0 {
            warn!(
                "{} entries share hash {:#x}, bucket {} can't be split",
                self.slots + 1,
                hash,
                id
            );
            return Err(Error::bucket_overflow(format!(
                "more than {} entries share hash {:#x}",
                self.slots, hash
            )));
        }
        let required = diff.trailing_zeros() + 1;
        if required > self.max_global_depth {
            warn!(
                "bucket {} needs depth {}, limit is {}",
                id, required, self.max_global_depth
            );
            return Err(Error::bucket_overflow(format!(
                "splitting needs global depth {} over the limit {}",
                required, self.max_global_depth
            )));
        }
        Ok(())
    }

    /// Puts `slot` into its bucket, splitting full buckets and redistributing
    /// their entries on the way. Relative order of entries is kept.
    fn place(&mut self, slot: Slot<K, V>) {
        let mut pending = VecDeque::from([slot]);
        while let Some(slot) = pending.pop_front() {
            let id = self.bucket_of(slot.hash);
            if !self.buckets[id].is_full(self.slots) {
                self.buckets[id].slots.push(slot);
                continue;
            }
            self.split(id);
            let moved = std::mem::take(&mut self.buckets[id].slots);
            let tail = std::mem::take(&mut pending);
            pending.extend(moved);
            pending.push_back(slot);
            pending.extend(tail);
        }
    }

    fn split(&mut self, id: usize) {
        let local = self.buckets[id].local_depth;
        if local == self.global_depth {
            self.directory.extend_from_within(..);
            self.global_depth += 1;
            debug!(
                "directory doubled to {} slots, global depth {}",
                self.directory.len(),
                self.global_depth
            );
        }
        let sibling = self.buckets.len();
        self.buckets[id].local_depth = local + 1;
        self.buckets.push(Bucket::new(local + 1, self.slots));
        for (i, target) in self.directory.iter_mut().enumerate() {
            if *target == id && (i >> local) & 1 == 1 {
                *target = sibling;
            }
        }
        trace!("bucket {} split into {} at local depth {}", id, sibling, local + 1);
    }
}

fn hash_of<K: Hash>(key: &K) -> u64 {
    let [k0, k1, k2, k3] = HASH_SEEDS;
    let mut hasher = RandomState::with_seeds(k0, k1, k2, k3).build_hasher();
    key.hash(&mut hasher);
    hasher.finish()
}

impl<K, V> Index<K, V> for ExtHash<K, V>
where
    K: Hash + Eq + Debug,
    V: Debug,
{
    fn get(&self, key: &K) -> Option<&V> {
        let hash = hash_of(key);
        self.buckets[self.bucket_of(hash)].find(hash, key)
    }

    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.insert(key, value).map(|_| None)
    }

    /// Slot capacity: slots per bucket times bucket count.
    fn size(&self) -> usize {
        self.slots * self.buckets.len()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        ExtHash::entries(self)
    }
}
