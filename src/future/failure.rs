//! Structured description of a failed computation.

use std::any::Any;
use std::fmt;

/// How a computation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The computation panicked.
    Panicked,
    /// The computation returned an error.
    Errored,
    /// The worker went away without reporting an outcome.
    Disconnected,
    /// The worker thread could not be started.
    Spawn,
}

/// A captured computation failure.
///
/// Failures never propagate past an [`AsyncBox`](crate::AsyncBox); they are
/// stored and their text is surfaced through the error slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Failure {
    kind: FailureKind,
    message: String,
}

impl Failure {
    /// Creates a failure of `kind` with a message.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Converts a panic payload.
    ///
    /// `&str` and `String` payloads keep their text; anything else becomes
    /// `"task panicked"`.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "task panicked".to_string()
        };
        Self::new(FailureKind::Panicked, message)
    }

    /// Converts an `anyhow` error, keeping its context chain.
    pub fn from_error(error: &anyhow::Error) -> Self {
        Self::new(FailureKind::Errored, format!("{error:#}"))
    }

    /// The failure kind.
    #[inline]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The failure text.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Failure {}
