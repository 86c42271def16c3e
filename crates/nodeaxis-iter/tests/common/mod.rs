#![allow(dead_code)]

use std::sync::Arc;

use nodeaxis_core::{AxisIterator, Error, IteratorState, NodeHandle, nodes};
use nodeaxis_iter::{ArrayIterator, Tree, TreeBuilder};

pub fn h(raw: u32) -> NodeHandle {
    NodeHandle::new(raw)
}

/// Drains the remaining nodes as raw handle values.
pub fn drain(iter: &mut dyn AxisIterator) -> Vec<u32> {
    nodes(iter).map(NodeHandle::get).collect()
}

/// ```text
/// 0  document
/// 1  <doc>
/// 2    <a id="x">           3 = @id
/// 4      <b/>
/// 5      <c id="y">         6 = @id
/// 7        <d/>
///        </c>
///      </a>
/// 8    <e ref="x y">        9 = @ref
/// 10     "tail"
///      </e>
///    </doc>
/// ```
pub fn sample_tree() -> Arc<Tree> {
    TreeBuilder::new()
        .element("doc")
        .element("a")
        .attribute("id", "x")
        .element("b")
        .end()
        .element("c")
        .attribute("id", "y")
        .element("d")
        .end()
        .end()
        .end()
        .element("e")
        .attribute("ref", "x y")
        .text("tail")
        .end()
        .end()
        .build()
}

/// Source whose state cannot be duplicated.
#[derive(Debug)]
pub struct NoCloneIterator {
    inner: ArrayIterator,
}

impl NoCloneIterator {
    pub fn new(raw: &[u32]) -> Self {
        Self { inner: ArrayIterator::from_raw(raw) }
    }
}

impl AxisIterator for NoCloneIterator {
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
        Err(Error::clone_unsupported("no-clone", "source holds an exclusive cursor"))
    }

    fn state(&self) -> &IteratorState {
        self.inner.state()
    }

    fn state_mut(&mut self) -> &mut IteratorState {
        self.inner.state_mut()
    }
}
