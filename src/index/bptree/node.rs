use super::prelude::*;

/// Position of a node inside the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct NodeId(pub(super) usize);

#[derive(Debug, Clone)]
pub(super) enum NodeKind<V> {
    Leaf {
        values: Vec<V>,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    Internal {
        children: Vec<NodeId>,
    },
}

/// Keys are kept sorted. A leaf stores one value per key, an internal node
/// one child more than keys.
#[derive(Debug, Clone)]
pub(super) struct Node<K, V> {
    pub(super) keys: Vec<K>,
    pub(super) kind: NodeKind<V>,
}

impl<K: Ord, V> Node<K, V> {
    pub(super) fn empty_leaf() -> Self {
        Self {
            keys: Vec::new(),
            kind: NodeKind::Leaf {
                values: Vec::new(),
                left: None,
                right: None,
            },
        }
    }

    pub(super) fn internal(keys: Vec<K>, children: Vec<NodeId>) -> Self {
        Self {
            keys,
            kind: NodeKind::Internal { children },
        }
    }

    pub(super) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Child to descend into: the first slot whose separator is greater than
    /// `key`, the last child when none is.
    pub(super) fn child_for(&self, key: &K) -> Option<NodeId> {
        match &self.kind {
            NodeKind::Internal { children } => {
                let slot = self.keys.partition_point(|k| k <= key);
                children.get(slot).copied()
            }
            NodeKind::Leaf { .. } => None,
        }
    }

    pub(super) fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Internal { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    pub(super) fn values(&self) -> &[V] {
        match &self.kind {
            NodeKind::Leaf { values, .. } => values,
            NodeKind::Internal { .. } => &[],
        }
    }

    pub(super) fn left(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Leaf { left, .. } => left,
            NodeKind::Internal { .. } => None,
        }
    }

    pub(super) fn right(&self) -> Option<NodeId> {
        match self.kind {
            NodeKind::Leaf { right, .. } => right,
            NodeKind::Internal { .. } => None,
        }
    }

    pub(super) fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().zip(self.values())
    }

    /// Value stored in this leaf under `key`.
    pub(super) fn find(&self, key: &K) -> Option<&V> {
        let pos = self.keys.binary_search(key).ok()?;
        self.values().get(pos)
    }

    pub(super) fn set_left(&mut self, id: Option<NodeId>) {
        if let NodeKind::Leaf { left, .. } = &mut self.kind {
            *left = id;
        }
    }

    /// Wedges `key` with its value into a leaf, keys must stay unique.
    pub(super) fn insert_entry(&mut self, pos: usize, key: K, value: V) {
        if let NodeKind::Leaf { values, .. } = &mut self.kind {
            self.keys.insert(pos, key);
            values.insert(pos, value);
        }
    }

    /// Places `separator` into an internal node with `child` on its right.
    pub(super) fn insert_child(&mut self, separator: K, child: NodeId) {
        if let NodeKind::Internal { children } = &mut self.kind {
            let slot = self.keys.partition_point(|k| *k <= separator);
            self.keys.insert(slot, separator);
            children.insert(slot + 1, child);
        }
    }

    /// Moves everything from key position `at` on into a new node that will
    /// live at `sibling`.
    ///
    /// A split leaf is linked between `this` and its old right neighbour, the
    /// neighbour's back link is left to the caller. A split internal node
    /// keeps `at + 1` children, the separator to push up stays as the first
    /// key of the returned node.
    pub(super) fn split_off(&mut self, at: usize, this: NodeId, sibling: NodeId) -> Self {
        let keys = self.keys.split_off(at);
        let kind = match &mut self.kind {
            NodeKind::Leaf { values, right, .. } => NodeKind::Leaf {
                values: values.split_off(at),
                left: Some(this),
                right: right.replace(sibling),
            },
            NodeKind::Internal { children } => NodeKind::Internal {
                children: children.split_off(at + 1),
            },
        };
        Self { keys, kind }
    }
}
