//! Growable buffer of node handles used to materialize iterator output.

use smallvec::SmallVec;

use crate::handle::NodeHandle;

/// Append-only, sortable, duplicate-tolerant list of node handles.
///
/// Cloning produces an independent copy; nothing is shared afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeBuffer {
    nodes: SmallVec<[NodeHandle; 16]>,
}

impl NodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: SmallVec::with_capacity(capacity) }
    }

    #[inline]
    pub fn push(&mut self, node: NodeHandle) {
        self.nodes.push(node);
    }

    /// Number of stored handles, duplicates included.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Sorts ascending by handle value, i.e. into document order.
    pub fn sort(&mut self) {
        self.nodes.sort_unstable();
    }

    /// Handle at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.cardinality()`.
    #[inline]
    pub fn at(&self, index: usize) -> NodeHandle {
        self.nodes[index]
    }

    /// Empties the buffer, keeping its allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn as_slice(&self) -> &[NodeHandle] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.nodes.iter().copied()
    }
}

impl Extend<NodeHandle> for NodeBuffer {
    fn extend<T: IntoIterator<Item = NodeHandle>>(&mut self, iter: T) {
        self.nodes.extend(iter);
    }
}

impl FromIterator<NodeHandle> for NodeBuffer {
    fn from_iter<T: IntoIterator<Item = NodeHandle>>(iter: T) -> Self {
        Self { nodes: iter.into_iter().collect() }
    }
}
