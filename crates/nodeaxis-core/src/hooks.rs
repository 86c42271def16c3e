//! Observer hooks: the runtime-error reporting channel and the node trace facade.

use crate::error::Error;
use crate::handle::NodeHandle;

/// Receives runtime errors before they are turned into evaluation failures.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &Error);
}

/// Default reporter: logs through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, error: &Error) {
        tracing::error!(code = %error.code(), %error, "iterator runtime error");
    }
}

/// Start/end events fired around each node handed to a consumer.
///
/// Both callbacks default to no-ops.
pub trait TraceListener: Send + Sync {
    fn trace_start(&self, _node: NodeHandle) {}
    fn trace_end(&self, _node: NodeHandle) {}
}
