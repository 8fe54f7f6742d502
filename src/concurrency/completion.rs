//! A single-use completion slot.
//!
//! One `Completer` publishes exactly one value; one `Completion` observes it.
//! The observer can check for completion without blocking, park until
//! completion, and take the value once.

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::parking::{wait_on_u32, wake_all_u32};

const STATE_EMPTY: u32 = 0;
const STATE_READY: u32 = 1;
const STATE_DISCONNECTED: u32 = 2;
const STATE_CONSUMED: u32 = 3;

struct Slot<T> {
    data: UnsafeCell<MaybeUninit<T>>,
    state: AtomicU32,
}

// SAFETY: `data` is written once by the completer before the Release store of
// READY and read once by whoever wins the READY -> CONSUMED transition.
unsafe impl<T: Send> Send for Slot<T> {}
unsafe impl<T: Send> Sync for Slot<T> {}

impl<T> Drop for Slot<T> {
    fn drop(&mut self) {
        if *self.state.get_mut() == STATE_READY {
            // SAFETY: READY means the payload was written and never taken.
            unsafe { self.data.get_mut().assume_init_drop() };
        }
    }
}

/// The publishing half.
pub struct Completer<T> {
    slot: Arc<Slot<T>>,
}

/// The observing half.
pub struct Completion<T> {
    slot: Arc<Slot<T>>,
}

/// Why [`Completion::try_take`] returned nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeError {
    /// Nothing has been published yet.
    Empty,
    /// The completer was dropped without publishing.
    Disconnected,
    /// The value was already taken.
    Consumed,
}

impl fmt::Display for TakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("completion slot is empty"),
            Self::Disconnected => f.write_str("completer dropped without publishing"),
            Self::Consumed => f.write_str("completion value already taken"),
        }
    }
}

impl std::error::Error for TakeError {}

/// Creates a connected completer/completion pair.
pub fn completion<T>() -> (Completer<T>, Completion<T>) {
    let slot = Arc::new(Slot {
        data: UnsafeCell::new(MaybeUninit::uninit()),
        state: AtomicU32::new(STATE_EMPTY),
    });
    (
        Completer {
            slot: Arc::clone(&slot),
        },
        Completion { slot },
    )
}

impl<T> Completer<T> {
    /// Publishes `value` and wakes any parked observer.
    pub fn complete(self, value: T) {
        // SAFETY: the completer is unique and the state is still EMPTY, so
        // nobody else reads or writes `data`.
        unsafe {
            (*self.slot.data.get()).write(value);
        }
        self.slot.state.store(STATE_READY, Ordering::Release);
        wake_all_u32(&self.slot.state);
    }
}

impl<T> Drop for Completer<T> {
    // No-op after `complete`: the state is no longer EMPTY.
    fn drop(&mut self) {
        if self
            .slot
            .state
            .compare_exchange(STATE_EMPTY, STATE_DISCONNECTED, Ordering::Release, Ordering::Relaxed)
            .is_ok()
        {
            wake_all_u32(&self.slot.state);
        }
    }
}

impl<T> Completion<T> {
    /// Zero-timeout check: has the completer published or gone away?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.slot.state.load(Ordering::Acquire) != STATE_EMPTY
    }

    /// Parks the calling thread until [`is_complete`](Self::is_complete) holds.
    pub fn wait(&self) {
        while self.slot.state.load(Ordering::Acquire) == STATE_EMPTY {
            wait_on_u32(&self.slot.state, STATE_EMPTY);
        }
    }

    /// Takes the published value without blocking.
    pub fn try_take(&mut self) -> Result<T, TakeError> {
        match self.slot.state.compare_exchange(
            STATE_READY,
            STATE_CONSUMED,
            Ordering::Acquire,
            Ordering::Acquire,
        ) {
            // SAFETY: we won READY -> CONSUMED, so the payload is initialized
            // and nobody else will read or drop it.
            Ok(_) => Ok(unsafe { (*self.slot.data.get()).assume_init_read() }),
            Err(STATE_EMPTY) => Err(TakeError::Empty),
            Err(STATE_DISCONNECTED) => Err(TakeError::Disconnected),
            Err(_) => Err(TakeError::Consumed),
        }
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("complete", &self.is_complete())
            .finish()
    }
}
