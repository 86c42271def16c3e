//! Key and id indexes.
//!
//! An index maps string values to the nodes carrying them. Lookups are
//! independent of any context node; the iterators they produce report
//! [`SourceKind::ContextIndependent`] so a wrapping
//! [`DupFilterIterator`](crate::DupFilterIterator) materializes them once.

use std::collections::HashMap;

use nodeaxis_core::{AxisIterator, Error, IteratorState, NodeHandle, SourceKind};
use smallvec::SmallVec;

use crate::array::ArrayIterator;
use crate::tree::{NodeKind, Tree};

/// Matches every element name in [`KeyIndex::build`].
pub const ANY_ELEMENT: &str = "*";

#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    name: String,
    entries: HashMap<String, SmallVec<[NodeHandle; 4]>>,
}

impl KeyIndex {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: HashMap::new() }
    }

    /// Indexes elements named `element` (or any element for [`ANY_ELEMENT`])
    /// by the value of their `use_attribute` attribute.
    pub fn build(tree: &Tree, name: impl Into<String>, element: &str, use_attribute: &str) -> Self {
        let mut index = Self::new(name);
        for raw in 0..tree.len() {
            let Ok(raw) = u32::try_from(raw) else { break };
            let node = NodeHandle::new(raw);
            if tree.kind(node) != NodeKind::Element {
                continue;
            }
            if element != ANY_ELEMENT && tree.name(node) != Some(element) {
                continue;
            }
            if let Some(attr) = tree.attribute(node, use_attribute) {
                index.add(tree.value(attr), node);
            }
        }
        tracing::debug!(key = %index.name, values = index.entries.len(), "key index built");
        index
    }

    /// Index backing `id()`: every element keyed by its `id` attribute.
    pub fn ids(tree: &Tree) -> Self {
        Self::build(tree, "id", ANY_ELEMENT, "id")
    }

    pub fn add(&mut self, value: impl Into<String>, node: NodeHandle) {
        self.entries.entry(value.into()).or_default().push(node);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct key values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nodes matching each value, concatenated in argument order.
    /// The result is neither sorted nor free of duplicates.
    pub fn lookup<I, S>(&self, values: I) -> KeyIndexIterator
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nodes = Vec::new();
        for value in values {
            if let Some(found) = self.entries.get(value.as_ref()) {
                nodes.extend_from_slice(found);
            }
        }
        KeyIndexIterator { inner: ArrayIterator::new(nodes) }
    }

    /// `id()` lookup: `refs` is a whitespace-separated list of id values.
    pub fn lookup_id_refs(&self, refs: &str) -> KeyIndexIterator {
        self.lookup(refs.split_whitespace())
    }
}

/// Result of a [`KeyIndex`] lookup.
#[derive(Debug, Clone)]
pub struct KeyIndexIterator {
    inner: ArrayIterator,
}

impl AxisIterator for KeyIndexIterator {
    fn set_start_node(&mut self, node: NodeHandle) -> &mut dyn AxisIterator {
        self.inner.set_start_node(node);
        self
    }

    fn next_node(&mut self) -> Option<NodeHandle> {
        self.inner.next_node()
    }

    fn reset(&mut self) -> &mut dyn AxisIterator {
        self.inner.reset();
        self
    }

    fn set_mark(&mut self) {
        self.inner.set_mark();
    }

    fn goto_mark(&mut self) {
        self.inner.goto_mark();
    }

    fn clone_iterator(&self) -> Result<Box<dyn AxisIterator>, Error> {
        let mut inner = self.inner.clone();
        inner.set_restartable(false);
        Ok(Box::new(Self { inner }))
    }

    fn state(&self) -> &IteratorState {
        self.inner.state()
    }

    fn state_mut(&mut self) -> &mut IteratorState {
        self.inner.state_mut()
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::ContextIndependent
    }
}
