use super::prelude::*;
use std::iter::successors;

const DEFAULT_ORDER: usize = 5;
const MIN_ORDER: usize = 3;

/// In-memory B+Tree with unique keys.
///
/// Nodes live in an arena and refer to each other by position. Every
/// key-value pair sits in a leaf, leaves are chained in both directions in
/// ascending key order, so range queries walk the chain instead of the tree.
/// A node of order `n` holds at most `n - 1` keys.
#[derive(Debug, Clone)]
pub struct BpTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: NodeId,
    order: usize,
}

impl<K, V> Default for BpTree<K, V>
where
    K: Ord + Clone + Debug,
    V: Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BpTree<K, V>
where
    K: Ord + Clone + Debug,
    V: Clone + Debug,
{
    /// Creates empty tree of order 5.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::empty_leaf()],
            root: NodeId(0),
            order: DEFAULT_ORDER,
        }
    }

    /// Creates empty tree with the given max number of children per node.
    ///
    /// # Errors
    /// Returns `WrongConfig` if `order` is less than 3.
    pub fn with_order(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::wrong_config(format!(
                "B+Tree order must be at least {}, got {}",
                MIN_ORDER, order
            )));
        }
        Ok(Self {
            order,
            ..Self::new()
        })
    }

    /// Max children per node.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of levels, a tree with only a root leaf has height 1.
    pub fn height(&self) -> usize {
        successors(Some(self.root), |id| self.node(*id).children().first().copied()).count()
    }

    /// Inserts a new pair.
    ///
    /// # Errors
    /// Returns `DuplicateKey` if `key` is already present, the tree is left
    /// untouched.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let mut path = Vec::new();
        let mut id = self.root;
        while let Some(child) = self.node(id).child_for(&key) {
            path.push(id);
            id = child;
        }
        let pos = match self.node(id).keys.binary_search(&key) {
            Ok(_) => {
                warn!("key {:?} is already in the tree, insert rejected", key);
                return Err(Error::duplicate_key(&key));
            }
            Err(pos) => pos,
        };
        let order = self.order;
        let leaf = self.node_mut(id);
        leaf.insert_entry(pos, key, value);
        if leaf.keys.len() < order {
            return Ok(());
        }
        let (separator, sibling) = self.split(id);
        self.insert_into_parent(path, id, separator, sibling);
        Ok(())
    }

    /// Entries in ascending key order.
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.chain(self.leftmost_leaf(), Node::right)
            .flat_map(Node::entries)
            .collect()
    }

    /// Validates the structure: keys sorted and within separator bounds,
    /// child counts, uniform leaf depth and the leaf chain links.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let mut leaves = Vec::new();
        let mut leaf_depth = None;
        self.check_node(self.root, 1, (None, None), &mut leaf_depth, &mut leaves)?;

        let chain: Vec<_> = successors(Some(self.leftmost_leaf()), |id| self.node(*id).right())
            .take(self.nodes.len() + 1)
            .collect();
        if chain != leaves {
            return Err(format!(
                "leaf chain {:?} doesn't match tree leaves {:?}",
                chain, leaves
            ));
        }
        if let Some(first) = chain.first() {
            if self.node(*first).left().is_some() {
                return Err("leftmost leaf has a left sibling".to_owned());
            }
        }
        for pair in chain.windows(2) {
            if self.node(pair[1]).left() != Some(pair[0]) {
                return Err(format!("leaf {:?} has a broken left link", pair[1]));
            }
        }
        let keys: Vec<_> = self.entries().into_iter().map(|(k, _)| k).collect();
        if keys.windows(2).any(|w| w[0] >= w[1]) {
            return Err("leaf chain keys are not ascending".to_owned());
        }
        Ok(())
    }

    fn check_node(
        &self,
        id: NodeId,
        depth: usize,
        (lower, upper): (Option<&K>, Option<&K>),
        leaf_depth: &mut Option<usize>,
        leaves: &mut Vec<NodeId>,
    ) -> std::result::Result<(), String> {
        let node = self.node(id);
        if node.keys.len() >= self.order {
            return Err(format!("node {:?} has {} keys", id, node.keys.len()));
        }
        if id != self.root && node.keys.is_empty() {
            return Err(format!("non root node {:?} is empty", id));
        }
        if node.keys.windows(2).any(|w| w[0] >= w[1]) {
            return Err(format!("node {:?} keys are not sorted", id));
        }
        let out_of_bounds = node.keys.iter().any(|k| {
            lower.map_or(false, |lo| k < lo) || upper.map_or(false, |hi| k >= hi)
        });
        if out_of_bounds {
            return Err(format!("node {:?} has keys outside its separators", id));
        }
        match &node.kind {
            NodeKind::Leaf { values, .. } => {
                if values.len() != node.keys.len() {
                    return Err(format!("leaf {:?} keys and values differ in count", id));
                }
                match *leaf_depth {
                    Some(d) if d != depth => {
                        return Err(format!("leaf {:?} at depth {}, expected {}", id, depth, d))
                    }
                    _ => *leaf_depth = Some(depth),
                }
                leaves.push(id);
            }
            NodeKind::Internal { children } => {
                if children.len() != node.keys.len() + 1 {
                    return Err(format!(
                        "internal {:?} has {} children for {} keys",
                        id,
                        children.len(),
                        node.keys.len()
                    ));
                }
                for (i, child) in children.iter().enumerate() {
                    let lo = if i == 0 { lower } else { node.keys.get(i - 1) };
                    let hi = node.keys.get(i).or(upper);
                    self.check_node(*child, depth + 1, (lo, hi), leaf_depth, leaves)?;
                }
            }
        }
        Ok(())
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    fn find_leaf(&self, key: &K) -> NodeId {
        let mut id = self.root;
        while let Some(child) = self.node(id).child_for(key) {
            id = child;
        }
        id
    }

    fn leftmost_leaf(&self) -> NodeId {
        successors(Some(self.root), |id| self.node(*id).children().first().copied())
            .last()
            .unwrap_or(self.root)
    }

    fn rightmost_leaf(&self) -> NodeId {
        successors(Some(self.root), |id| self.node(*id).children().last().copied())
            .last()
            .unwrap_or(self.root)
    }

    /// Leaves from `start` following `step` links.
    fn chain(
        &self,
        start: NodeId,
        step: fn(&Node<K, V>) -> Option<NodeId>,
    ) -> impl Iterator<Item = &Node<K, V>> + '_ {
        successors(Some(self.node(start)), move |node| {
            step(node).map(|id| self.node(id))
        })
    }

    /// Splits an overflowing node, returns the separator for the parent and
    /// the new right sibling.
    fn split(&mut self, id: NodeId) -> (K, NodeId) {
        let sibling = NodeId(self.nodes.len());
        let at = self.order / 2;
        let mut node = self.node_mut(id).split_off(at, id, sibling);
        let separator = if node.is_leaf() {
            if let Some(right) = node.right() {
                self.node_mut(right).set_left(Some(sibling));
            }
            node.keys[0].clone()
        } else {
            node.keys.remove(0)
        };
        trace!("node {:?} split, separator {:?} moves up", id, separator);
        self.nodes.push(node);
        (separator, sibling)
    }

    fn insert_into_parent(
        &mut self,
        mut path: Vec<NodeId>,
        mut left: NodeId,
        mut separator: K,
        mut right: NodeId,
    ) {
        let order = self.order;
        while let Some(parent) = path.pop() {
            let node = self.node_mut(parent);
            node.insert_child(separator, right);
            if node.keys.len() < order {
                return;
            }
            let (up, sibling) = self.split(parent);
            left = parent;
            separator = up;
            right = sibling;
        }
        self.root = NodeId(self.nodes.len());
        self.nodes
            .push(Node::internal(vec![separator], vec![left, right]));
        debug!("new root {:?}, tree height {}", self.root, self.height());
    }
}

impl<K, V> Index<K, V> for BpTree<K, V>
where
    K: Ord + Clone + Debug,
    V: Clone + Debug,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.node(self.find_leaf(key)).find(key)
    }

    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.insert(key, value).map(|_| None)
    }

    /// Sum of key counts along the leaf chain.
    fn size(&self) -> usize {
        self.chain(self.leftmost_leaf(), Node::right)
            .map(|leaf| leaf.keys.len())
            .sum()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        BpTree::entries(self)
    }
}

impl<K, V> OrderedIndex<K, V> for BpTree<K, V>
where
    K: Ord + Clone + Debug,
    V: Clone + Debug,
{
    fn first_key(&self) -> Option<&K> {
        self.node(self.leftmost_leaf()).keys.first()
    }

    fn last_key(&self) -> Option<&K> {
        self.node(self.rightmost_leaf()).keys.last()
    }

    fn head_map(&self, to: &K) -> BTreeMap<K, V> {
        self.chain(self.find_leaf(to), Node::left)
            .flat_map(Node::entries)
            .filter(|(k, _)| *k < to)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn tail_map(&self, from: &K) -> BTreeMap<K, V> {
        self.chain(self.find_leaf(from), Node::right)
            .flat_map(Node::entries)
            .filter(|(k, _)| *k >= from)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn sub_map(&self, from: &K, to: &K) -> BTreeMap<K, V> {
        if from >= to {
            return BTreeMap::new();
        }
        self.chain(self.find_leaf(from), Node::right)
            .flat_map(Node::entries)
            .skip_while(|(k, _)| *k < from)
            .take_while(|(k, _)| *k < to)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
