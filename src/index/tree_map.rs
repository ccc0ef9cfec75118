use super::*;

/// Default index: a thin wrapper over the standard balanced tree.
///
/// `put` on a present key overwrites it and hands back the old value.
#[derive(Debug, Clone, Default)]
pub struct TreeMapIndex<K, V> {
    inner: BTreeMap<K, V>,
}

impl<K: Ord, V> TreeMapIndex<K, V> {
    /// Creates empty index.
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, V> Index<K, V> for TreeMapIndex<K, V>
where
    K: Ord + Debug,
    V: Debug,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(self.inner.insert(key, value))
    }

    fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    fn size(&self) -> usize {
        self.inner.len()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.inner.iter().collect()
    }
}

impl<K, V> OrderedIndex<K, V> for TreeMapIndex<K, V>
where
    K: Ord + Clone + Debug,
    V: Clone + Debug,
{
    fn first_key(&self) -> Option<&K> {
        self.inner.keys().next()
    }

    fn last_key(&self) -> Option<&K> {
        self.inner.keys().next_back()
    }

    fn head_map(&self, to: &K) -> BTreeMap<K, V> {
        collect(self.inner.range(..to))
    }

    fn tail_map(&self, from: &K) -> BTreeMap<K, V> {
        collect(self.inner.range(from..))
    }

    fn sub_map(&self, from: &K, to: &K) -> BTreeMap<K, V> {
        if from >= to {
            return BTreeMap::new();
        }
        collect(self.inner.range(from..to))
    }
}

fn collect<'a, K, V>(iter: impl Iterator<Item = (&'a K, &'a V)>) -> BTreeMap<K, V>
where
    K: Ord + Clone + 'a,
    V: Clone + 'a,
{
    iter.map(|(k, v)| (k.clone(), v.clone())).collect()
}
