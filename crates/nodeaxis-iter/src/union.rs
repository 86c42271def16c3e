use nodeaxis_core::{AxisIterator, Error, IteratorState, NodeHandle, SourceKind};
use smallvec::SmallVec;

type Branches = SmallVec<[Box<dyn AxisIterator>; 4]>;

/// Union of several iterators bound to the same start node.
///
/// Yields every branch's nodes back to back, so the output is neither in
/// document order nor duplicate-free. Wrap it in a
/// [`DupFilterIterator`](crate::DupFilterIterator) for node-set semantics.
#[derive(Debug)]
pub struct UnionIterator {
    branches: Branches,
    state: IteratorState,
    current: usize,
    marked: (usize, usize),
}

impl UnionIterator {
    pub fn new(branches: impl IntoIterator<Item = Box<dyn AxisIterator>>) -> Self {
        Self { branches: branches.into_iter().collect(), state: IteratorState::new(), current: 0, marked: (0, 0) }
    }

    #[must_use]
    pub fn with_branch(mut self, branch: Box<dyn AxisIterator>) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }
}

impl AxisIterator for UnionIterator {
    fn set_start_node(&mut self, node: NodeHandle) -> &mut dyn AxisIterator {
        if self.state.accepts_start(node) {
            self.state.bind(node);
            for branch in &mut self.branches {
                branch.set_start_node(node);
            }
            self.current = 0;
        }
        self
    }

    fn next_node(&mut self) -> Option<NodeHandle> {
        while let Some(branch) = self.branches.get_mut(self.current) {
            if let Some(node) = branch.next_node() {
                return self.state.return_node(node);
            }
            self.current += 1;
        }
        None
    }

    fn reset(&mut self) -> &mut dyn AxisIterator {
        for branch in &mut self.branches {
            branch.reset();
        }
        self.current = 0;
        self.state.reset_position();
        self
    }

    fn set_mark(&mut self) {
        for branch in &mut self.branches {
            branch.set_mark();
        }
        self.marked = (self.current, self.state.position());
    }

    fn goto_mark(&mut self) {
        for branch in &mut self.branches {
            branch.goto_mark();
        }
        self.current = self.marked.0;
        self.state.restore_position(self.marked.1);
    }

    fn clone_iterator(&self) -> Result<Box<dyn AxisIterator>, Error> {
        let branches = self.branches.iter().map(|b| b.clone_iterator()).collect::<Result<Branches, Error>>()?;
        Ok(Box::new(Self { branches, state: self.state.frozen(), current: self.current, marked: self.marked }))
    }

    fn set_restartable(&mut self, restartable: bool) {
        self.state.set_restartable(restartable);
        for branch in &mut self.branches {
            branch.set_restartable(restartable);
        }
    }

    fn state(&self) -> &IteratorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IteratorState {
        &mut self.state
    }

    /// Context independent only when every branch is.
    fn source_kind(&self) -> SourceKind {
        if !self.branches.is_empty()
            && self.branches.iter().all(|b| b.source_kind() == SourceKind::ContextIndependent)
        {
            SourceKind::ContextIndependent
        } else {
            SourceKind::Axis
        }
    }
}
