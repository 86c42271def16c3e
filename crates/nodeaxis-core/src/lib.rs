//! Core types for nodeaxis: the node handle space, the axis iterator contract,
//! the shared iterator state and the node buffer used for materialization.

pub mod buffer;
pub mod error;
pub mod handle;
pub mod hooks;
pub mod iterator;
pub mod state;

pub use buffer::NodeBuffer;
pub use error::{Error, ErrorCode};
pub use handle::NodeHandle;
pub use hooks::{ErrorReporter, LogReporter, TraceListener};
pub use iterator::{AxisIterator, Nodes, SourceKind, nodes};
pub use state::IteratorState;
