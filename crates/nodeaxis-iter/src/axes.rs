//! Structural axis iterators over a [`Tree`].

use core::fmt;
use std::sync::Arc;

use nodeaxis_core::{AxisIterator, Error, IteratorState, NodeHandle};

use crate::tree::{NodeKind, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisKind {
    SelfAxis,
    Child,
    Parent,
    Ancestor,
    AncestorOrSelf,
    Descendant,
    DescendantOrSelf,
    FollowingSibling,
    PrecedingSibling,
    Following,
    Preceding,
    Attribute,
}

impl AxisKind {
    pub fn is_reverse(self) -> bool {
        matches!(
            self,
            AxisKind::Ancestor | AxisKind::AncestorOrSelf | AxisKind::PrecedingSibling | AxisKind::Preceding
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            AxisKind::SelfAxis => "self",
            AxisKind::Child => "child",
            AxisKind::Parent => "parent",
            AxisKind::Ancestor => "ancestor",
            AxisKind::AncestorOrSelf => "ancestor-or-self",
            AxisKind::Descendant => "descendant",
            AxisKind::DescendantOrSelf => "descendant-or-self",
            AxisKind::FollowingSibling => "following-sibling",
            AxisKind::PrecedingSibling => "preceding-sibling",
            AxisKind::Following => "following",
            AxisKind::Preceding => "preceding",
            AxisKind::Attribute => "attribute",
        }
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Traversal state per axis. Every variant stays exhausted once it yields `None`.
#[derive(Debug, Clone)]
enum AxisCursor {
    // No start node bound yet
    Unbound,
    // self, parent: at most one node
    Single { next: Option<NodeHandle> },
    // child, following-sibling
    Siblings { next: Option<NodeHandle> },
    // preceding-sibling
    ReverseSiblings { next: Option<NodeHandle> },
    // ancestor, ancestor-or-self
    Ancestors { next: Option<NodeHandle> },
    // descendant(-or-self), following: contiguous handle range minus attributes
    Range { pending_self: Option<NodeHandle>, next: u32, end: u32 },
    // preceding: walks handles downward, skipping the ancestor chain
    Preceding { next: Option<u32>, ancestor: Option<NodeHandle> },
    Attributes { owner: NodeHandle, index: usize },
}

/// Iterator over one structural axis of a shared [`Tree`].
#[derive(Debug, Clone)]
pub struct TreeAxisIterator {
    tree: Arc<Tree>,
    axis: AxisKind,
    state: IteratorState,
    cursor: AxisCursor,
    marked: Option<(AxisCursor, usize)>,
}

impl TreeAxisIterator {
    pub fn new(tree: Arc<Tree>, axis: AxisKind) -> Self {
        Self { tree, axis, state: IteratorState::new(), cursor: AxisCursor::Unbound, marked: None }
    }

    pub fn axis(&self) -> AxisKind {
        self.axis
    }

    pub fn tree(&self) -> &Arc<Tree> {
        &self.tree
    }

    fn initial_cursor(&self, node: NodeHandle) -> AxisCursor {
        let tree = &*self.tree;
        let is_attr = tree.is_attribute(node);
        match self.axis {
            AxisKind::SelfAxis => AxisCursor::Single { next: Some(node) },
            AxisKind::Parent => AxisCursor::Single { next: tree.parent(node) },
            AxisKind::Child => AxisCursor::Siblings { next: tree.first_child(node) },
            AxisKind::FollowingSibling => {
                AxisCursor::Siblings { next: if is_attr { None } else { tree.next_sibling(node) } }
            }
            AxisKind::PrecedingSibling => {
                AxisCursor::ReverseSiblings { next: if is_attr { None } else { tree.previous_sibling(node) } }
            }
            AxisKind::Ancestor => AxisCursor::Ancestors { next: tree.parent(node) },
            AxisKind::AncestorOrSelf => AxisCursor::Ancestors { next: Some(node) },
            AxisKind::Descendant => {
                AxisCursor::Range { pending_self: None, next: node.get() + 1, end: tree.subtree_end(node).get() }
            }
            AxisKind::DescendantOrSelf => AxisCursor::Range {
                pending_self: Some(node),
                next: node.get() + 1,
                end: tree.subtree_end(node).get(),
            },
            AxisKind::Following => AxisCursor::Range {
                pending_self: None,
                next: tree.subtree_end(node).get(),
                end: u32::try_from(tree.len()).unwrap_or(u32::MAX),
            },
            AxisKind::Preceding => AxisCursor::Preceding { next: node.get().checked_sub(1), ancestor: tree.parent(node) },
            AxisKind::Attribute => AxisCursor::Attributes { owner: node, index: 0 },
        }
    }

    fn next_candidate(&mut self) -> Option<NodeHandle> {
        let tree = &*self.tree;
        match &mut self.cursor {
            AxisCursor::Unbound => {
                panic!("{} axis iterator advanced before a start node was bound", self.axis)
            }
            AxisCursor::Single { next } => next.take(),
            AxisCursor::Siblings { next } => {
                let cur = (*next)?;
                *next = tree.next_sibling(cur);
                Some(cur)
            }
            AxisCursor::ReverseSiblings { next } => {
                let cur = (*next)?;
                *next = tree.previous_sibling(cur);
                Some(cur)
            }
            AxisCursor::Ancestors { next } => {
                let cur = (*next)?;
                *next = tree.parent(cur);
                Some(cur)
            }
            AxisCursor::Range { pending_self, next, end } => {
                if let Some(own) = pending_self.take() {
                    return Some(own);
                }
                while *next < *end {
                    let cur = NodeHandle::new(*next);
                    *next += 1;
                    if tree.kind(cur) != NodeKind::Attribute {
                        return Some(cur);
                    }
                }
                None
            }
            AxisCursor::Preceding { next, ancestor } => {
                while let Some(raw) = *next {
                    *next = raw.checked_sub(1);
                    let cur = NodeHandle::new(raw);
                    if Some(cur) == *ancestor {
                        *ancestor = tree.parent(cur);
                        continue;
                    }
                    if tree.kind(cur) != NodeKind::Attribute {
                        return Some(cur);
                    }
                }
                None
            }
            AxisCursor::Attributes { owner, index } => {
                let cur = tree.attributes(*owner).get(*index).copied()?;
                *index += 1;
                Some(cur)
            }
        }
    }
}

impl AxisIterator for TreeAxisIterator {
    fn set_start_node(&mut self, node: NodeHandle) -> &mut dyn AxisIterator {
        if self.state.accepts_start(node) {
            self.state.bind(node);
            self.cursor = self.initial_cursor(node);
        }
        self
    }

    fn next_node(&mut self) -> Option<NodeHandle> {
        let node = self.next_candidate()?;
        self.state.return_node(node)
    }

    fn reset(&mut self) -> &mut dyn AxisIterator {
        if let Some(node) = self.state.start_node() {
            self.cursor = self.initial_cursor(node);
            self.state.reset_position();
        }
        self
    }

    fn set_mark(&mut self) {
        self.marked = Some((self.cursor.clone(), self.state.position()));
    }

    fn goto_mark(&mut self) {
        if let Some((cursor, position)) = &self.marked {
            self.cursor = cursor.clone();
            self.state.restore_position(*position);
        }
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

    fn is_reverse(&self) -> bool {
        self.axis.is_reverse()
    }
}
