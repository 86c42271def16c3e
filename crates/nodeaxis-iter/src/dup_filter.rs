//! Duplicate elimination and document-order sorting.
//!
//! Unions of path expressions and repeated `id()`/`key()` lookups produce
//! node handles out of document order and with repeats. [`DupFilterIterator`]
//! turns any such source into a node-set: on every (re)start it drains the
//! source into a [`NodeBuffer`], sorts the buffer by handle (document order)
//! and replays it, skipping a handle equal to the one emitted just before.
//! Sorting groups equal handles, so comparing adjacent entries is enough.
//!
//! Sources reporting [`SourceKind::ContextIndependent`] are materialized once,
//! relative to [`NodeHandle::ROOT`], when the iterator is created; later
//! start nodes are ignored.

use nodeaxis_core::{AxisIterator, Error, IteratorState, NodeBuffer, NodeHandle, SourceKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Mark {
    current: usize,
    last_next: Option<NodeHandle>,
    position: usize,
}

/// Sorts its source into document order and removes duplicate handles.
///
/// ```
/// use nodeaxis_core::{AxisIterator, NodeHandle, nodes};
/// use nodeaxis_iter::{ArrayIterator, DupFilterIterator};
///
/// let mut it = DupFilterIterator::new(Box::new(ArrayIterator::from_raw(&[5, 3, 3, 7, 1])));
/// it.set_start_node(NodeHandle::ROOT);
/// let out: Vec<u32> = nodes(&mut it).map(NodeHandle::get).collect();
/// assert_eq!(out, [1, 3, 5, 7]);
/// ```
#[derive(Debug)]
pub struct DupFilterIterator {
    source: Box<dyn AxisIterator>,
    state: IteratorState,
    nodes: NodeBuffer,
    // Index into `nodes` of the next candidate
    current: usize,
    // Last handle returned by `next_node`, `None` before the first one
    last_next: Option<NodeHandle>,
    marked: Mark,
}

impl DupFilterIterator {
    pub fn new(source: Box<dyn AxisIterator>) -> Self {
        let context_independent = source.source_kind() == SourceKind::ContextIndependent;
        let mut iter = Self {
            source,
            state: IteratorState::new(),
            nodes: NodeBuffer::new(),
            current: 0,
            last_next: None,
            marked: Mark::default(),
        };
        // Start node is irrelevant for id()/key(); read the index right away so
        // unions with several calls to the same index share one materialization.
        if context_independent {
            iter.set_start_node(NodeHandle::ROOT);
        }
        iter
    }

    pub fn source(&self) -> &dyn AxisIterator {
        &*self.source
    }

    /// Materialized, sorted handles of the current start node, duplicates included.
    pub fn buffer(&self) -> &NodeBuffer {
        &self.nodes
    }

    fn materialize(&mut self, node: NodeHandle) {
        self.state.bind(node);
        // A source already bound to `node` ignores the rebind; rewind it so the
        // drain always sees the whole sequence.
        self.source.set_start_node(node).reset();
        self.nodes.clear();
        while let Some(next) = self.source.next_node() {
            self.nodes.push(next);
        }
        self.nodes.sort();
        self.current = 0;
        self.last_next = None;
        tracing::debug!(
            start = %node,
            materialized = self.nodes.cardinality(),
            distinct = distinct_count(self.nodes.as_slice()),
            "node set materialized"
        );
    }
}

// Number of distinct handles in a sorted slice.
fn distinct_count(sorted: &[NodeHandle]) -> usize {
    if sorted.is_empty() {
        return 0;
    }
    1 + sorted.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

impl AxisIterator for DupFilterIterator {
    fn set_start_node(&mut self, node: NodeHandle) -> &mut dyn AxisIterator {
        if !self.state.is_restartable() {
            tracing::trace!(start = %node, "start node ignored: iterator is not restartable");
            return self;
        }
        // Key and id indexes are always relative to the root node; re-reading
        // them would be redundant and must not happen.
        if self.source.source_kind() == SourceKind::ContextIndependent
            && self.state.start_node() == Some(NodeHandle::ROOT)
        {
            tracing::trace!(start = %node, "start node ignored: source is context independent");
            return self;
        }
        if self.state.start_node() == Some(node) {
            tracing::trace!(start = %node, "start node ignored: already bound");
            return self;
        }
        self.materialize(node);
        self
    }

    fn next_node(&mut self) -> Option<NodeHandle> {
        assert!(self.state.start_node().is_some(), "dup filter iterator advanced before a start node was bound");
        while self.current < self.nodes.cardinality() {
            let next = self.nodes.at(self.current);
            self.current += 1;
            if Some(next) != self.last_next {
                self.last_next = Some(next);
                return self.state.return_node(next);
            }
        }
        None
    }

    fn reset(&mut self) -> &mut dyn AxisIterator {
        self.current = 0;
        self.last_next = None;
        self.state.reset_position();
        self
    }

    fn set_mark(&mut self) {
        self.marked = Mark { current: self.current, last_next: self.last_next, position: self.state.position() };
    }

    fn goto_mark(&mut self) {
        self.current = self.marked.current;
        self.last_next = self.marked.last_next;
        self.state.restore_position(self.marked.position);
    }

    /// Copies the buffer, clones the source and rewinds the copy to its first node.
    fn clone_iterator(&self) -> Result<Box<dyn AxisIterator>, Error> {
        let source = self.source.clone_iterator()?;
        let mut clone = Self {
            source,
            state: self.state.frozen(),
            nodes: self.nodes.clone(),
            current: 0,
            last_next: None,
            marked: self.marked,
        };
        clone.reset();
        Ok(Box::new(clone))
    }

    fn set_restartable(&mut self, restartable: bool) {
        self.state.set_restartable(restartable);
        self.source.set_restartable(restartable);
    }

    fn state(&self) -> &IteratorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IteratorState {
        &mut self.state
    }

    // A filter over an index is itself fixed to the root; nesting filters must
    // not re-drain an already exhausted inner one.
    fn source_kind(&self) -> SourceKind {
        self.source.source_kind()
    }
}
