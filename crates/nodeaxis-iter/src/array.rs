use std::sync::Arc;

use nodeaxis_core::{AxisIterator, Error, IteratorState, NodeHandle};

/// Replays a fixed list of handles, whatever the start node.
///
/// Used for materialized variables and result fragments. The list is shared
/// between clones; only the cursor is per instance.
#[derive(Debug, Clone)]
pub struct ArrayIterator {
    nodes: Arc<[NodeHandle]>,
    state: IteratorState,
    current: usize,
    marked: (usize, usize),
}

impl ArrayIterator {
    pub fn new(nodes: impl Into<Arc<[NodeHandle]>>) -> Self {
        Self { nodes: nodes.into(), state: IteratorState::new(), current: 0, marked: (0, 0) }
    }

    pub fn from_raw(raw: &[u32]) -> Self {
        Self::new(raw.iter().copied().map(NodeHandle::new).collect::<Vec<_>>())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl AxisIterator for ArrayIterator {
    fn set_start_node(&mut self, node: NodeHandle) -> &mut dyn AxisIterator {
        if self.state.accepts_start(node) {
            self.state.bind(node);
            self.current = 0;
        }
        self
    }

    fn next_node(&mut self) -> Option<NodeHandle> {
        let node = self.nodes.get(self.current).copied()?;
        self.current += 1;
        self.state.return_node(node)
    }

    fn reset(&mut self) -> &mut dyn AxisIterator {
        self.current = 0;
        self.state.reset_position();
        self
    }

    fn set_mark(&mut self) {
        self.marked = (self.current, self.state.position());
    }

    fn goto_mark(&mut self) {
        self.current = self.marked.0;
        self.state.restore_position(self.marked.1);
    }

    fn clone_iterator(&self) -> Result<Box<dyn AxisIterator>, Error> {
        Ok(Box::new(Self { state: self.state.frozen(), ..self.clone() }))
    }

    fn state(&self) -> &IteratorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IteratorState {
        &mut self.state
    }
}
