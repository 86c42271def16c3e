use crate::handle::NodeHandle;

/// Bookkeeping shared by every axis iterator: bound start node,
/// restartability and the 1-based position of the last returned node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IteratorState {
    start_node: Option<NodeHandle>,
    restartable: bool,
    position: usize,
}

impl Default for IteratorState {
    fn default() -> Self {
        Self { start_node: None, restartable: true, position: 0 }
    }
}

impl IteratorState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn start_node(&self) -> Option<NodeHandle> {
        self.start_node
    }

    /// Whether `set_start_node(node)` should re-derive iteration state:
    /// the iterator must be restartable and `node` must differ from the bound one.
    #[inline]
    pub fn accepts_start(&self, node: NodeHandle) -> bool {
        self.restartable && self.start_node != Some(node)
    }

    pub fn bind(&mut self, node: NodeHandle) {
        self.start_node = Some(node);
        self.position = 0;
    }

    #[inline]
    pub fn is_restartable(&self) -> bool {
        self.restartable
    }

    pub fn set_restartable(&mut self, restartable: bool) {
        self.restartable = restartable;
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset_position(&mut self) {
        self.position = 0;
    }

    pub fn restore_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Counts `node` as produced and hands it back.
    #[inline]
    pub fn return_node(&mut self, node: NodeHandle) -> Option<NodeHandle> {
        self.position += 1;
        Some(node)
    }

    /// Copy for a cloned iterator: same start node, no longer restartable.
    #[must_use]
    pub fn frozen(&self) -> Self {
        Self { restartable: false, ..self.clone() }
    }
}
