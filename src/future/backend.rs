//! Execution backends behind an [`AsyncBox`](crate::AsyncBox).
//!
//! Every backend answers the same three questions: has the computation
//! finished (`poll`), block until it has (`wait`), and hand over the outcome
//! exactly once (`take`). The box picks one backend at construction and never
//! swaps it.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use crossbeam_utils::Backoff;

use super::failure::{Failure, FailureKind};
use super::options::WorkerOptions;
use super::readiness::Readiness;
use crate::concurrency::completion::{completion, Completion, TakeError};

/// Outcome reported by a backend: the value, or the captured failure.
pub type Outcome<T> = Result<T, Failure>;

/// Capability shared by all backends.
pub trait Backend<T> {
    /// Zero-timeout completion check. May advance a cooperative computation.
    fn poll(&mut self) -> bool;

    /// Blocks the calling thread until [`poll`](Self::poll) would return `true`.
    fn wait(&mut self);

    /// Hands over the outcome. `None` until finished, and after the first take.
    fn take(&mut self) -> Option<Outcome<T>>;
}

/// Which backend a box was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Outcome known at construction.
    Immediate,
    /// A future driven on the calling thread.
    Cooperative,
    /// A detached worker thread.
    Worker,
}

// ===== Immediate =====

/// An outcome that was known before the box existed.
pub struct Immediate<T> {
    outcome: Option<Outcome<T>>,
}

impl<T> Immediate<T> {
    /// Wraps an already-known outcome.
    pub(crate) fn new(outcome: Outcome<T>) -> Self {
        Self {
            outcome: Some(outcome),
        }
    }
}

impl<T> Backend<T> for Immediate<T> {
    #[inline]
    fn poll(&mut self) -> bool {
        true
    }

    #[inline]
    fn wait(&mut self) {}

    #[inline]
    fn take(&mut self) -> Option<Outcome<T>> {
        self.outcome.take()
    }
}

// ===== Cooperative =====

type BoxedComputation<T> = Pin<Box<dyn Future<Output = Outcome<T>> + Send>>;

enum Stage<T> {
    Running(BoxedComputation<T>),
    Finished(Outcome<T>),
    Taken,
}

/// A future resumed on the calling thread.
///
/// It only runs when resumed: once at construction (up to its first
/// suspension point), then on every `poll`/`wait`. The future is dropped as
/// soon as it finishes; only its outcome is kept.
pub struct Cooperative<T> {
    stage: Stage<T>,
}

impl<T> Cooperative<T> {
    /// Starts `computation`, running it up to its first suspension point.
    pub(crate) fn start<F>(computation: F) -> Self
    where
        F: Future<Output = Outcome<T>> + Send + 'static,
    {
        let mut cooperative = Self {
            stage: Stage::Running(Box::pin(computation)),
        };
        cooperative.resume();
        cooperative
    }

    /// Resumes the computation once; returns `true` once it has finished.
    fn resume(&mut self) -> bool {
        let Stage::Running(computation) = &mut self.stage else {
            return true;
        };

        let mut cx = Context::from_waker(Waker::noop());
        let polled = panic::catch_unwind(AssertUnwindSafe(|| computation.as_mut().poll(&mut cx)));
        self.stage = match polled {
            Ok(Poll::Pending) => return false,
            Ok(Poll::Ready(outcome)) => Stage::Finished(outcome),
            Err(payload) => Stage::Finished(Err(Failure::from_panic(&*payload))),
        };
        true
    }
}

impl<T> Backend<T> for Cooperative<T> {
    #[inline]
    fn poll(&mut self) -> bool {
        self.resume()
    }

    fn wait(&mut self) {
        let backoff = Backoff::new();
        while !self.resume() {
            backoff.snooze();
        }
    }

    fn take(&mut self) -> Option<Outcome<T>> {
        match std::mem::replace(&mut self.stage, Stage::Taken) {
            Stage::Finished(outcome) => Some(outcome),
            running @ Stage::Running(_) => {
                self.stage = running;
                None
            }
            Stage::Taken => None,
        }
    }
}

// ===== Worker =====

/// A computation running on a detached worker thread.
///
/// The worker publishes its outcome through a completion slot and then flips
/// the shared readiness flag, so observers holding a
/// [`ReadinessHandle`](super::ReadinessHandle) see it finish without polling.
pub struct Worker<T> {
    completion: Completion<Outcome<T>>,
}

impl<T: Send + 'static> Worker<T> {
    /// Starts `body` on a new thread configured by `options`.
    ///
    /// Panics inside `body` are caught on the worker and reported as
    /// [`FailureKind::Panicked`]. If the thread cannot be created, the error
    /// is returned as a [`FailureKind::Spawn`] failure.
    pub(crate) fn spawn<F>(options: &WorkerOptions, readiness: Readiness, body: F) -> Result<Self, Failure>
    where
        F: FnOnce() -> Outcome<T> + Send + 'static,
    {
        let (completer, completion) = completion();
        options
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(body))
                    .unwrap_or_else(|payload| Err(Failure::from_panic(&*payload)));
                completer.complete(outcome);
                readiness.mark_ready();
            })
            .map_err(|error| {
                Failure::new(FailureKind::Spawn, format!("failed to spawn worker thread: {error}"))
            })?;
        Ok(Self { completion })
    }
}

impl<T> Backend<T> for Worker<T> {
    #[inline]
    fn poll(&mut self) -> bool {
        self.completion.is_complete()
    }

    #[inline]
    fn wait(&mut self) {
        self.completion.wait();
    }

    fn take(&mut self) -> Option<Outcome<T>> {
        match self.completion.try_take() {
            Ok(outcome) => Some(outcome),
            Err(TakeError::Disconnected) => Some(Err(Failure::new(
                FailureKind::Disconnected,
                "worker exited without reporting an outcome",
            ))),
            Err(TakeError::Empty | TakeError::Consumed) => None,
        }
    }
}

// ===== Dispatch =====

/// The closed set of backends, dispatched by the box.
pub(crate) enum AnyBackend<T> {
    Immediate(Immediate<T>),
    Cooperative(Cooperative<T>),
    Worker(Worker<T>),
}

impl<T> AnyBackend<T> {
    pub(crate) fn kind(&self) -> BackendKind {
        match self {
            Self::Immediate(_) => BackendKind::Immediate,
            Self::Cooperative(_) => BackendKind::Cooperative,
            Self::Worker(_) => BackendKind::Worker,
        }
    }
}

impl<T> Backend<T> for AnyBackend<T> {
    #[inline]
    fn poll(&mut self) -> bool {
        match self {
            Self::Immediate(b) => b.poll(),
            Self::Cooperative(b) => b.poll(),
            Self::Worker(b) => b.poll(),
        }
    }

    #[inline]
    fn wait(&mut self) {
        match self {
            Self::Immediate(b) => b.wait(),
            Self::Cooperative(b) => b.wait(),
            Self::Worker(b) => b.wait(),
        }
    }

    #[inline]
    fn take(&mut self) -> Option<Outcome<T>> {
        match self {
            Self::Immediate(b) => b.take(),
            Self::Cooperative(b) => b.take(),
            Self::Worker(b) => b.take(),
        }
    }
}
