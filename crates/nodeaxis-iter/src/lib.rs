//! Node iteration for an XPath/XSLT tree-query engine.
//!
//! Structural axes ([`TreeAxisIterator`]), key/id lookups ([`KeyIndex`]),
//! unions and fixed node lists all implement
//! [`AxisIterator`](nodeaxis_core::AxisIterator). [`DupFilterIterator`] turns
//! any of them into a duplicate-free sequence in document order and is used
//! exactly like the iterator it wraps.

pub mod array;
pub mod axes;
pub mod context;
pub mod dup_filter;
pub mod key_index;
pub mod tree;
pub mod union;

pub use array::ArrayIterator;
pub use axes::{AxisKind, TreeAxisIterator};
pub use context::{EvalContext, EvalContextBuilder};
pub use dup_filter::DupFilterIterator;
pub use key_index::{KeyIndex, KeyIndexIterator};
pub use tree::{NodeKind, Tree, TreeBuilder};
pub use union::UnionIterator;

pub use nodeaxis_core::{AxisIterator, Error, ErrorCode, NodeHandle, SourceKind};
