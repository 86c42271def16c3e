use core::fmt;

/// Runtime error codes reported through the evaluation error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// An iterator could not be duplicated.
    IteratorClone,
    /// Internal failure of the iteration runtime.
    InternalRuntime,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IteratorClone => "ITERATOR_CLONE_ERR",
            ErrorCode::InternalRuntime => "RUN_TIME_INTERNAL_ERR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The iterator (or one of its sources) cannot be cloned. Not retryable.
    #[error("cannot clone {iterator} iterator: {reason}")]
    CloneUnsupported { iterator: &'static str, reason: String },

    /// User-visible evaluation failure.
    #[error("{code}: {message}")]
    Runtime { code: ErrorCode, message: String },
}

impl Error {
    pub fn clone_unsupported(iterator: &'static str, reason: impl Into<String>) -> Self {
        Error::CloneUnsupported { iterator, reason: reason.into() }
    }

    pub fn runtime(code: ErrorCode, message: impl Into<String>) -> Self {
        Error::Runtime { code, message: message.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Error::CloneUnsupported { .. } => ErrorCode::IteratorClone,
            Error::Runtime { code, .. } => *code,
        }
    }

    /// Converts the error into the evaluation failure surfaced to callers.
    #[must_use]
    pub fn into_runtime(self) -> Self {
        match self {
            runtime @ Error::Runtime { .. } => runtime,
            other => Error::runtime(other.code(), other.to_string()),
        }
    }
}
