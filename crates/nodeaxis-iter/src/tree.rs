//! Integer-addressed, immutable in-memory document.
//!
//! Handles are assigned in pre-order while building, so handle order is
//! document order: a node precedes its attributes, attributes precede the
//! element's children, and every subtree occupies a contiguous handle range.
//!
//! ```
//! use nodeaxis_iter::tree::{NodeKind, TreeBuilder};
//!
//! // <root id="r"><item>a</item><item/></root>
//! let tree = TreeBuilder::new()
//!     .element("root")
//!     .attribute("id", "r")
//!     .element("item").text("a").end()
//!     .element("item").end()
//!     .end()
//!     .build();
//!
//! let root = tree.document_element().unwrap();
//! assert_eq!(tree.name(root), Some("root"));
//! assert_eq!(tree.kind(tree.attributes(root)[0]), NodeKind::Attribute);
//! assert_eq!(tree.string_value(root), "a");
//! ```

use std::sync::Arc;

use nodeaxis_core::NodeHandle;
use smallvec::SmallVec;

use crate::axes::{AxisKind, TreeAxisIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
}

#[derive(Debug, Clone)]
struct NodeRec {
    kind: NodeKind,
    name: Option<String>,
    value: String,
    parent: Option<NodeHandle>,
    first_child: Option<NodeHandle>,
    last_child: Option<NodeHandle>,
    next_sibling: Option<NodeHandle>,
    prev_sibling: Option<NodeHandle>,
    attributes: SmallVec<[NodeHandle; 4]>,
    // Exclusive upper bound of the handles in this node's subtree.
    end: u32,
}

impl NodeRec {
    fn new(kind: NodeKind, name: Option<String>, value: String, parent: Option<NodeHandle>) -> Self {
        Self {
            kind,
            name,
            value,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prev_sibling: None,
            attributes: SmallVec::new(),
            end: 0,
        }
    }
}

/// Read-only document. All queries panic on handles that do not belong to the tree.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<NodeRec>,
}

impl Tree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeHandle {
        NodeHandle::ROOT
    }

    pub fn contains(&self, node: NodeHandle) -> bool {
        node.index() < self.nodes.len()
    }

    fn rec(&self, node: NodeHandle) -> &NodeRec {
        &self.nodes[node.index()]
    }

    pub fn kind(&self, node: NodeHandle) -> NodeKind {
        self.rec(node).kind
    }

    pub fn is_attribute(&self, node: NodeHandle) -> bool {
        self.rec(node).kind == NodeKind::Attribute
    }

    pub fn name(&self, node: NodeHandle) -> Option<&str> {
        self.rec(node).name.as_deref()
    }

    /// Own value of attribute, text and comment nodes; empty for containers.
    pub fn value(&self, node: NodeHandle) -> &str {
        &self.rec(node).value
    }

    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.rec(node).parent
    }

    pub fn first_child(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.rec(node).first_child
    }

    pub fn last_child(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.rec(node).last_child
    }

    pub fn next_sibling(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.rec(node).next_sibling
    }

    pub fn previous_sibling(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.rec(node).prev_sibling
    }

    pub fn attributes(&self, node: NodeHandle) -> &[NodeHandle] {
        &self.rec(node).attributes
    }

    /// Attribute of `node` named `name`.
    pub fn attribute(&self, node: NodeHandle, name: &str) -> Option<NodeHandle> {
        self.attributes(node).iter().copied().find(|a| self.name(*a) == Some(name))
    }

    /// First handle after the subtree rooted at `node`.
    pub fn subtree_end(&self, node: NodeHandle) -> NodeHandle {
        NodeHandle::new(self.rec(node).end)
    }

    /// First element child of the document node.
    pub fn document_element(&self) -> Option<NodeHandle> {
        let mut child = self.first_child(NodeHandle::ROOT);
        while let Some(c) = child {
            if self.kind(c) == NodeKind::Element {
                return Some(c);
            }
            child = self.next_sibling(c);
        }
        None
    }

    /// Concatenated text of descendant text nodes for containers; own value otherwise.
    pub fn string_value(&self, node: NodeHandle) -> String {
        match self.kind(node) {
            NodeKind::Document | NodeKind::Element => {
                let end = self.rec(node).end;
                (node.get() + 1..end)
                    .map(NodeHandle::new)
                    .filter(|n| self.kind(*n) == NodeKind::Text)
                    .map(|n| self.value(n))
                    .collect()
            }
            _ => self.value(node).to_owned(),
        }
    }

    /// Iterator over `axis`, not yet bound to a start node.
    pub fn axis(self: &Arc<Self>, axis: AxisKind) -> TreeAxisIterator {
        TreeAxisIterator::new(Arc::clone(self), axis)
    }
}

/// Builds a [`Tree`] in document order.
///
/// Attributes must be added to an open element before its first child.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<NodeRec>,
    open: SmallVec<[NodeHandle; 16]>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let document = NodeRec::new(NodeKind::Document, None, String::new(), None);
        let mut open = SmallVec::new();
        open.push(NodeHandle::ROOT);
        Self { nodes: vec![document], open }
    }

    fn next_handle(&self) -> NodeHandle {
        let raw = u32::try_from(self.nodes.len()).expect("tree exceeds the node handle space");
        NodeHandle::new(raw)
    }

    fn current(&self) -> NodeHandle {
        *self.open.last().expect("document node is always open")
    }

    fn append_child(&mut self, kind: NodeKind, name: Option<String>, value: String) -> NodeHandle {
        let parent = self.current();
        let handle = self.next_handle();
        let mut rec = NodeRec::new(kind, name, value, Some(parent));
        rec.end = handle.get() + 1;
        rec.prev_sibling = self.nodes[parent.index()].last_child;
        if let Some(prev) = rec.prev_sibling {
            self.nodes[prev.index()].next_sibling = Some(handle);
        } else {
            self.nodes[parent.index()].first_child = Some(handle);
        }
        self.nodes[parent.index()].last_child = Some(handle);
        self.nodes.push(rec);
        handle
    }

    /// Opens an element; subsequent nodes are added to it until [`end`](Self::end).
    #[must_use]
    pub fn element(mut self, name: impl Into<String>) -> Self {
        let handle = self.append_child(NodeKind::Element, Some(name.into()), String::new());
        self.open.push(handle);
        self
    }

    /// # Panics
    /// Panics when the open node is not an element or already has children.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let owner = self.current();
        let rec = &self.nodes[owner.index()];
        assert!(rec.kind == NodeKind::Element, "attributes can only be added to elements");
        assert!(rec.first_child.is_none(), "attributes must precede the element's children");
        let handle = self.next_handle();
        let mut attr = NodeRec::new(NodeKind::Attribute, Some(name.into()), value.into(), Some(owner));
        attr.end = handle.get() + 1;
        self.nodes.push(attr);
        self.nodes[owner.index()].attributes.push(handle);
        self
    }

    #[must_use]
    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.append_child(NodeKind::Text, None, value.into());
        self
    }

    #[must_use]
    pub fn comment(mut self, value: impl Into<String>) -> Self {
        self.append_child(NodeKind::Comment, None, value.into());
        self
    }

    /// Closes the innermost open element.
    ///
    /// # Panics
    /// Panics when no element is open.
    #[must_use]
    pub fn end(mut self) -> Self {
        assert!(self.open.len() > 1, "no open element to end");
        self.close_current();
        self
    }

    fn close_current(&mut self) {
        if let Some(handle) = self.open.pop() {
            let end = self.next_handle().get();
            self.nodes[handle.index()].end = end;
        }
    }

    /// Closes any elements still open and freezes the tree.
    pub fn build(mut self) -> Arc<Tree> {
        while !self.open.is_empty() {
            self.close_current();
        }
        tracing::trace!(nodes = self.nodes.len(), "tree built");
        Arc::new(Tree { nodes: self.nodes })
    }
}
