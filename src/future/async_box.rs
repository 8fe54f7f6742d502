//! `AsyncBox`: a pending-or-finished computation with a three-slot
//! decomposition and a memoized outcome.

use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use super::backend::{AnyBackend, Backend, BackendKind, Cooperative, Immediate, Worker};
use super::failure::{Failure, FailureKind};
use super::options::WorkerOptions;
use super::readiness::{Readiness, ReadinessHandle};
use crate::value::{ResultBox, ValueBox};

/// Where an [`AsyncBox`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsyncState {
    /// The backend has not finished.
    Pending,
    /// The backend finished; nothing has been extracted yet.
    ReadyUnconsumed,
    /// The value was extracted and cached.
    ConsumedSuccess,
    /// The failure was extracted and cached.
    ConsumedError,
}

/// Write-once cache of the extracted outcome.
enum Cached<T> {
    Unconsumed,
    Value(T),
    Failed(Failure),
}

/// The three slots of a decomposed [`AsyncBox`].
#[derive(Debug)]
pub struct AsyncParts<'a, T> {
    /// The value, present once a successful outcome has been extracted.
    pub value: ValueBox<&'a T>,
    /// The failure text, present once a failed outcome has been extracted.
    pub error: ValueBox<&'a str>,
    /// Live readiness flag; keeps updating after the parts are dropped.
    pub ready: ReadinessHandle,
}

impl<'a, T> AsyncParts<'a, T> {
    /// Flattens the parts into a `(value, error, ready)` tuple.
    #[inline]
    pub fn into_tuple(self) -> (ValueBox<&'a T>, ValueBox<&'a str>, ReadinessHandle) {
        (self.value, self.error, self.ready)
    }
}

/// A computation in progress or finished, backed by an immediate value, a
/// cooperative future, or a worker thread.
///
/// The outcome is taken from the backend at most once, on the first
/// extraction after the backend finishes, and cached from then on. Failures
/// (panics, returned errors, a vanished worker) are captured as a [`Failure`]
/// and surfaced as text in the error slot; they never propagate to the caller.
///
/// `AsyncBox` is move-only and not `Sync`: the cache has a single owner.
///
/// # Example
///
/// ```rust
/// use monobox::AsyncBox;
///
/// let mut sum = AsyncBox::from_future(async { 2 + 3 });
/// let (value, error, ready) = sum.decompose().into_tuple();
/// assert!(ready.get());
/// assert_eq!(value.get(), Some(&&5));
/// assert!(!error.is_present());
/// ```
pub struct AsyncBox<T> {
    backend: AnyBackend<T>,
    readiness: Readiness,
    cached: Cached<T>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T> AsyncBox<T> {
    fn with_backend(backend: AnyBackend<T>, ready: bool) -> Self {
        trace_event!(trace, backend = ?backend.kind(), ready, "async box created");
        Self {
            backend,
            readiness: Readiness::new(ready),
            cached: Cached::Unconsumed,
            _not_sync: PhantomData,
        }
    }

    /// Wraps an already-known value. Starts [`AsyncState::ReadyUnconsumed`].
    pub fn ready(value: T) -> Self {
        Self::with_backend(AnyBackend::Immediate(Immediate::new(Ok(value))), true)
    }

    /// Wraps an already-known failure. Starts [`AsyncState::ReadyUnconsumed`].
    pub fn failed(failure: Failure) -> Self {
        Self::with_backend(AnyBackend::Immediate(Immediate::new(Err(failure))), true)
    }

    /// The backend this box was built with.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Current lifecycle state, as of the last readiness observation.
    pub fn state(&self) -> AsyncState {
        match self.cached {
            Cached::Value(_) => AsyncState::ConsumedSuccess,
            Cached::Failed(_) => AsyncState::ConsumedError,
            Cached::Unconsumed if self.readiness.get() => AsyncState::ReadyUnconsumed,
            Cached::Unconsumed => AsyncState::Pending,
        }
    }

    /// Returns `true` once an outcome has been extracted.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        !matches!(self.cached, Cached::Unconsumed)
    }

    /// Asks the backend whether the computation has finished and refreshes the
    /// readiness flag.
    ///
    /// A cooperative backend is resumed once on the calling thread; a worker
    /// backend gets a zero-timeout check. Never touches the cached outcome.
    pub fn poll_ready(&mut self) -> bool {
        let ready = self.is_consumed() || self.backend.poll();
        if ready {
            self.readiness.mark_ready();
        }
        ready
    }

    /// Blocks until the computation has finished.
    pub fn wait(&mut self) {
        if !self.is_consumed() {
            self.backend.wait();
        }
        self.readiness.mark_ready();
    }

    /// Returns a live handle to the readiness flag, polling first.
    pub fn readiness_handle(&mut self) -> ReadinessHandle {
        self.poll_ready();
        self.readiness.handle()
    }

    /// Takes the backend outcome into the cache if it is available and not
    /// yet taken.
    fn consume(&mut self) {
        if self.is_consumed() || !self.poll_ready() {
            return;
        }

        let outcome = self.backend.take().unwrap_or_else(|| {
            Err(Failure::new(
                FailureKind::Disconnected,
                "backend finished without an outcome",
            ))
        });
        self.cached = match outcome {
            Ok(value) => {
                trace_event!(debug, backend = ?self.backend.kind(), "async computation succeeded");
                Cached::Value(value)
            }
            Err(failure) => {
                trace_event!(
                    debug,
                    backend = ?self.backend.kind(),
                    kind = ?failure.kind(),
                    message = failure.message(),
                    "async computation failed"
                );
                Cached::Failed(failure)
            }
        };
    }

    /// Extracts the value slot.
    ///
    /// While pending this is empty and changes nothing. The first call after
    /// the backend finishes takes and caches the outcome; later calls return
    /// the cache without touching the backend. A failed outcome yields an
    /// empty slot here and text in [`extract_error`](Self::extract_error).
    pub fn extract_value(&mut self) -> ValueBox<&T> {
        self.consume();
        self.value_slot()
    }

    fn value_slot(&self) -> ValueBox<&T> {
        match &self.cached {
            Cached::Value(value) => ValueBox::new(value),
            Cached::Unconsumed | Cached::Failed(_) => ValueBox::empty(),
        }
    }

    /// The cached failure text; present only after a failed extraction.
    pub fn extract_error(&self) -> ValueBox<&str> {
        match &self.cached {
            Cached::Failed(failure) => ValueBox::new(failure.message()),
            Cached::Unconsumed | Cached::Value(_) => ValueBox::empty(),
        }
    }

    /// The cached structured failure, if extraction produced one.
    pub fn failure(&self) -> Option<&Failure> {
        match &self.cached {
            Cached::Failed(failure) => Some(failure),
            Cached::Unconsumed | Cached::Value(_) => None,
        }
    }

    /// Decomposes into value slot, error slot and live readiness handle.
    ///
    /// The backend is polled at most once.
    pub fn decompose(&mut self) -> AsyncParts<'_, T> {
        self.consume();
        AsyncParts {
            value: self.value_slot(),
            error: self.extract_error(),
            ready: self.readiness.handle(),
        }
    }

    /// Waits for the computation and returns its owned outcome.
    pub fn into_value(mut self) -> ResultBox<T, Failure> {
        self.wait();
        self.consume();
        match std::mem::replace(&mut self.cached, Cached::Unconsumed) {
            Cached::Value(value) => ResultBox::new(value),
            Cached::Failed(failure) => ResultBox::from_error(failure),
            Cached::Unconsumed => ResultBox::from_error(Failure::new(
                FailureKind::Disconnected,
                "backend finished without an outcome",
            )),
        }
    }
}

impl<T: Send + 'static> AsyncBox<T> {
    fn cooperative<F>(computation: F) -> Self
    where
        F: Future<Output = Result<T, Failure>> + Send + 'static,
    {
        let mut cooperative = Cooperative::start(computation);
        let ready = cooperative.poll();
        Self::with_backend(AnyBackend::Cooperative(cooperative), ready)
    }

    /// Starts a cooperative computation on the calling thread.
    ///
    /// The future runs immediately up to its first suspension point. After
    /// that it only advances when the box is polled, waited on, or extracted.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self::cooperative(async move { Ok(future.await) })
    }

    /// Like [`from_future`](Self::from_future) for a fallible future; an `Err`
    /// output is captured as a [`FailureKind::Errored`] failure.
    pub fn try_from_future<F>(future: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self::cooperative(async move { future.await.map_err(|error| Failure::from_error(&error)) })
    }

    fn worker<F>(options: &WorkerOptions, body: F) -> Self
    where
        F: FnOnce() -> Result<T, Failure> + Send + 'static,
    {
        let readiness = Readiness::new(false);
        match Worker::spawn(options, readiness.clone(), body) {
            Ok(worker) => {
                trace_event!(trace, backend = ?BackendKind::Worker, thread = options.thread_name(), "async box created");
                Self {
                    backend: AnyBackend::Worker(worker),
                    readiness,
                    cached: Cached::Unconsumed,
                    _not_sync: PhantomData,
                }
            }
            Err(failure) => {
                trace_event!(warn, error = failure.message(), "worker thread did not start");
                Self::failed(failure)
            }
        }
    }

    /// Runs `body` on a detached worker thread with default [`WorkerOptions`].
    pub fn spawn<F>(body: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::spawn_with(&WorkerOptions::default(), body)
    }

    /// Runs `body` on a detached worker thread configured by `options`.
    ///
    /// If the thread cannot be started, the box is built already finished with
    /// a [`FailureKind::Spawn`] failure.
    pub fn spawn_with<F>(options: &WorkerOptions, body: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::worker(options, move || Ok(body()))
    }

    /// Runs a fallible `body` on a detached worker thread.
    pub fn try_spawn<F>(body: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    {
        Self::try_spawn_with(&WorkerOptions::default(), body)
    }

    /// Runs a fallible `body` on a detached worker thread configured by
    /// `options`.
    pub fn try_spawn_with<F>(options: &WorkerOptions, body: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    {
        Self::worker(options, move || body().map_err(|error| Failure::from_error(&error)))
    }
}

impl<T: fmt::Debug> fmt::Debug for AsyncBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("AsyncBox");
        s.field("backend", &self.backend.kind())
            .field("state", &self.state());
        match &self.cached {
            Cached::Value(value) => s.field("value", value),
            Cached::Failed(failure) => s.field("error", &failure.message()),
            Cached::Unconsumed => &mut s,
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_ready_starts_ready_unconsumed() {
        let mut boxed = AsyncBox::ready(String::from("cached"));
        assert_eq!(boxed.backend_kind(), BackendKind::Immediate);
        assert_eq!(boxed.state(), AsyncState::ReadyUnconsumed);
        assert!(boxed.poll_ready());
        assert_eq!(boxed.extract_value().get().map(|s| s.as_str()), Some("cached"));
        assert_eq!(boxed.state(), AsyncState::ConsumedSuccess);
    }

    #[test]
    fn test_poll_does_not_consume() {
        let mut boxed = AsyncBox::ready(1);
        for _ in 0..3 {
            assert!(boxed.poll_ready());
        }
        assert!(!boxed.is_consumed());
        assert_eq!(boxed.state(), AsyncState::ReadyUnconsumed);
    }

    #[test]
    fn test_worker_body_runs_exactly_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut boxed = {
            let runs = Arc::clone(&runs);
            AsyncBox::spawn(move || {
                runs.fetch_add(1, Ordering::SeqCst);
                vec![1, 2, 3]
            })
        };
        boxed.wait();
        for _ in 0..4 {
            assert_eq!(boxed.extract_value().get().map(|v| v.len()), Some(3));
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_constructor() {
        let mut boxed: AsyncBox<u8> = AsyncBox::failed(Failure::new(FailureKind::Errored, "nope"));
        assert!(!boxed.extract_value().is_present());
        assert_eq!(boxed.extract_error().get(), Some(&"nope"));
        assert_eq!(boxed.state(), AsyncState::ConsumedError);
        assert_eq!(boxed.failure().map(Failure::kind), Some(FailureKind::Errored));
    }

    #[test]
    fn test_into_value_waits() {
        let boxed = AsyncBox::spawn(|| {
            std::thread::sleep(Duration::from_millis(10));
            11
        });
        assert_eq!(boxed.into_value().into_result(), Ok(11));

        let failed: AsyncBox<i32> = AsyncBox::try_spawn(|| Err(anyhow::anyhow!("bad input")));
        let outcome = failed.into_value();
        assert_eq!(outcome.error().map(Failure::message), Some("bad input"));
    }

    #[test]
    fn test_debug_shows_state() {
        let mut boxed = AsyncBox::ready(5);
        boxed.extract_value();
        let rendered = format!("{boxed:?}");
        assert!(rendered.contains("ConsumedSuccess"));
        assert!(rendered.contains("value: 5"));
    }

    /// Finishes after being resumed `remaining + 1` times, counting every resume.
    struct CountedYields {
        remaining: usize,
        resumes: Arc<AtomicUsize>,
    }

    impl Future for CountedYields {
        type Output = usize;

        fn poll(
            mut self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<usize> {
            let resumes = self.resumes.fetch_add(1, Ordering::SeqCst) + 1;
            if self.remaining == 0 {
                std::task::Poll::Ready(resumes)
            } else {
                self.remaining -= 1;
                std::task::Poll::Pending
            }
        }
    }

    #[test]
    fn test_pending_poll_keeps_raised_flag() {
        let mut boxed = AsyncBox::from_future(std::future::pending::<u32>());
        let handle = boxed.readiness_handle();
        assert!(!handle.get());

        // A worker may raise the flag between the backend check and the
        // box's own bookkeeping; a later `false` answer must not lower it.
        boxed.readiness.mark_ready();
        assert!(!boxed.poll_ready());
        assert!(handle.get());
        assert!(!boxed.decompose().value.is_present());
        assert!(handle.get());
    }

    #[test]
    fn test_decompose_resumes_once() {
        let resumes = Arc::new(AtomicUsize::new(0));
        let mut boxed = AsyncBox::from_future(CountedYields {
            remaining: 3,
            resumes: Arc::clone(&resumes),
        });
        assert_eq!(resumes.load(Ordering::SeqCst), 1);

        let parts = boxed.decompose();
        assert!(!parts.ready.get());
        assert!(!parts.value.is_present());
        assert_eq!(resumes.load(Ordering::SeqCst), 2);

        boxed.decompose();
        boxed.decompose();
        let (value, error, ready) = boxed.decompose().into_tuple();
        assert!(ready.get());
        assert_eq!(value.get(), Some(&&4));
        assert!(!error.is_present());
        assert_eq!(resumes.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_box_is_send() {
        fn assert_send<S: Send>() {}
        assert_send::<AsyncBox<String>>();
    }
}
