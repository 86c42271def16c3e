use core::fmt;

/// Integer identifier of a tree node.
///
/// Handles are owned by the tree model. Their order coincides with document
/// order and equal handles always denote the same node, so sorting and
/// deduplicating handles yields a node-set in document order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(u32);

impl NodeHandle {
    /// The synthetic document root.
    pub const ROOT: NodeHandle = NodeHandle(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Position of the node in a handle-indexed table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_root(self) -> bool {
        self.0 == Self::ROOT.0
    }
}

impl From<u32> for NodeHandle {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<NodeHandle> for u32 {
    fn from(node: NodeHandle) -> Self {
        node.0
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
