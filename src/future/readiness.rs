//! Shared, live readiness flag.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owner side of the readiness flag, held by the box and its worker.
#[derive(Clone)]
pub(crate) struct Readiness {
    flag: Arc<AtomicBool>,
}

impl Readiness {
    pub(crate) fn new(ready: bool) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(ready)),
        }
    }

    /// Raises the flag. Readiness never goes back to `false`.
    #[inline]
    pub(crate) fn mark_ready(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn get(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    pub(crate) fn handle(&self) -> ReadinessHandle {
        ReadinessHandle {
            flag: Arc::clone(&self.flag),
        }
    }
}

/// A live view of an [`AsyncBox`](crate::AsyncBox)'s readiness flag.
///
/// The handle is refreshed in place: a `poll_ready` on the box that finds the
/// computation finished raises the shared flag, and a worker-thread backend
/// raises it itself when it finishes. Once raised it stays `true`. A caller can therefore keep one handle
/// across a polling loop instead of decomposing the box again.
///
/// ```rust
/// use monobox::AsyncBox;
/// use std::time::Duration;
///
/// let mut task = AsyncBox::spawn(|| {
///     std::thread::sleep(Duration::from_millis(20));
///     7
/// });
/// let ready = task.readiness_handle();
/// while !ready.get() {
///     std::thread::sleep(Duration::from_millis(5));
/// }
/// assert_eq!(task.extract_value().get(), Some(&&7));
/// ```
#[derive(Clone)]
pub struct ReadinessHandle {
    flag: Arc<AtomicBool>,
}

impl ReadinessHandle {
    /// The latest observed readiness.
    #[inline]
    pub fn get(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl fmt::Debug for ReadinessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadinessHandle").field(&self.get()).finish()
    }
}

impl fmt::Debug for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Readiness").field(&self.get()).finish()
    }
}
