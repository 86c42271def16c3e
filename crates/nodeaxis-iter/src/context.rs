//! Evaluation context: error channel, trace facade and their configuration.

use core::fmt;
use std::sync::Arc;

use nodeaxis_core::{AxisIterator, Error, ErrorReporter, LogReporter, NodeHandle, TraceListener};

/// Per-evaluation services used while driving iterators.
#[derive(Clone)]
pub struct EvalContext {
    reporter: Arc<dyn ErrorReporter>,
    trace: Option<Arc<dyn TraceListener>>,
    trace_enabled: bool,
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("trace", &self.trace.is_some())
            .field("trace_enabled", &self.trace_enabled)
            .finish_non_exhaustive()
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        EvalContextBuilder::new().build()
    }
}

impl EvalContext {
    pub fn builder() -> EvalContextBuilder {
        EvalContextBuilder::new()
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace_enabled && self.trace.is_some()
    }

    /// Clones `iter` for nested use.
    ///
    /// A clone failure is reported through the configured [`ErrorReporter`] and
    /// returned as an [`ErrorCode::IteratorClone`](nodeaxis_core::ErrorCode::IteratorClone) runtime error, never as an
    /// empty iterator.
    pub fn clone_iterator(&self, iter: &dyn AxisIterator) -> Result<Box<dyn AxisIterator>, Error> {
        iter.clone_iterator().map_err(|err| {
            self.reporter.report(&err);
            err.into_runtime()
        })
    }

    /// Hands every remaining node of `iter` to `f`, firing trace start/end
    /// events around each call when tracing is enabled. The end event fires
    /// even when `f` fails; the first error stops the iteration.
    pub fn for_each_node<F>(&self, iter: &mut dyn AxisIterator, mut f: F) -> Result<(), Error>
    where
        F: FnMut(NodeHandle) -> Result<(), Error>,
    {
        let listener = if self.trace_enabled { self.trace.as_deref() } else { None };
        while let Some(node) = iter.next_node() {
            if let Some(l) = listener {
                l.trace_start(node);
            }
            let result = f(node);
            if let Some(l) = listener {
                l.trace_end(node);
            }
            result?;
        }
        Ok(())
    }

    /// Remaining nodes of `iter`, traced like [`for_each_node`](Self::for_each_node).
    pub fn collect(&self, iter: &mut dyn AxisIterator) -> Result<Vec<NodeHandle>, Error> {
        let mut out = Vec::new();
        self.for_each_node(iter, |node| {
            out.push(node);
            Ok(())
        })?;
        Ok(out)
    }
}

/// Builder for [`EvalContext`]. Defaults: [`LogReporter`], no trace listener,
/// tracing enabled once a listener is set.
pub struct EvalContextBuilder {
    ctx: EvalContext,
}

impl fmt::Debug for EvalContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContextBuilder").field("ctx", &self.ctx).finish()
    }
}

impl Default for EvalContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EvalContextBuilder {
    pub fn new() -> Self {
        Self { ctx: EvalContext { reporter: Arc::new(LogReporter), trace: None, trace_enabled: true } }
    }

    #[must_use]
    pub fn with_error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.ctx.reporter = reporter;
        self
    }

    #[must_use]
    pub fn with_trace_listener(mut self, listener: Arc<dyn TraceListener>) -> Self {
        self.ctx.trace = Some(listener);
        self
    }

    /// Turns trace events off without removing the listener.
    #[must_use]
    pub fn with_trace_enabled(mut self, enabled: bool) -> Self {
        self.ctx.trace_enabled = enabled;
        self
    }

    pub fn build(self) -> EvalContext {
        self.ctx
    }
}
