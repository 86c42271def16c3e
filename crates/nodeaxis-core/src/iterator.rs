//! The axis iterator contract.

use core::fmt;

use crate::error::Error;
use crate::handle::NodeHandle;
use crate::state::IteratorState;

/// How an iterator's result depends on its start node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Results are derived from the start node (structural axes, unions of axes).
    #[default]
    Axis,
    /// Results are independent of the start node (`id()` / `key()` lookups).
    /// Such sources are materialized once, relative to [`NodeHandle::ROOT`].
    ContextIndependent,
}

/// Stateful cursor over a sequence of node handles relative to a start node.
///
/// The end of the sequence is `None`; once returned, `next_node` keeps
/// returning `None` until the iterator is restarted or reset.
pub trait AxisIterator: fmt::Debug {
    /// Binds the iterator to `node`. Re-derives state only when the iterator is
    /// restartable and `node` differs from the bound start node; otherwise a no-op.
    fn set_start_node(&mut self, node: NodeHandle) -> &mut dyn AxisIterator;

    /// Next node in this iterator's order, or `None` when exhausted.
    ///
    /// # Panics
    /// Axis and filtering iterators panic when advanced before any start node
    /// was bound. Fixed-list sources (arrays, key lookups) replay without one.
    fn next_node(&mut self) -> Option<NodeHandle>;

    /// Rewinds to the first position without rebinding the start node.
    fn reset(&mut self) -> &mut dyn AxisIterator;

    fn set_mark(&mut self);

    fn goto_mark(&mut self);

    /// Deep, independent copy over the same tree. The copy is not restartable.
    fn clone_iterator(&self) -> Result<Box<dyn AxisIterator>, Error>;

    fn state(&self) -> &IteratorState;

    fn state_mut(&mut self) -> &mut IteratorState;

    fn set_restartable(&mut self, restartable: bool) {
        self.state_mut().set_restartable(restartable);
    }

    fn start_node(&self) -> Option<NodeHandle> {
        self.state().start_node()
    }

    fn is_restartable(&self) -> bool {
        self.state().is_restartable()
    }

    /// 1-based position of the most recently returned node; 0 before the first.
    fn position(&self) -> usize {
        self.state().position()
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Axis
    }

    /// Reverse axes number positions outward from the start node.
    fn is_reverse(&self) -> bool {
        false
    }

    /// Size of the whole sequence, computed on a rewound clone.
    fn last(&self) -> Result<usize, Error> {
        let mut probe = self.clone_iterator()?;
        probe.reset();
        let mut count = 0;
        while probe.next_node().is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Node at 1-based `position` of the whole sequence, computed on a rewound clone.
    fn node_by_position(&self, position: usize) -> Result<Option<NodeHandle>, Error> {
        if position == 0 {
            return Ok(None);
        }
        let mut probe = self.clone_iterator()?;
        probe.reset();
        while let Some(node) = probe.next_node() {
            if probe.position() == position {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }
}

/// Adapter exposing an [`AxisIterator`] as a standard [`Iterator`].
#[derive(Debug)]
pub struct Nodes<'a, I: AxisIterator + ?Sized> {
    iter: &'a mut I,
}

impl<'a, I: AxisIterator + ?Sized> Nodes<'a, I> {
    pub fn new(iter: &'a mut I) -> Self {
        Self { iter }
    }
}

impl<I: AxisIterator + ?Sized> Iterator for Nodes<'_, I> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<NodeHandle> {
        self.iter.next_node()
    }
}

pub fn nodes<I: AxisIterator + ?Sized>(iter: &mut I) -> Nodes<'_, I> {
    Nodes::new(iter)
}
