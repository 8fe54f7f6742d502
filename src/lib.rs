//! # `monobox` - Decomposable Value Containers
//!
//! A small family of monadic boxes that all speak the same *positional
//! decomposition* protocol: any box can be unpacked at its use site into a
//! fixed number of independent observer slots, without the caller branching
//! first.
//!
//! ## Containers
//!
//! | Box | Slots |
//! |---|---|
//! | [`ValueBox<T>`] | value borrow, presence flag |
//! | [`ResultBox<T, E>`] | `ValueBox<&T>`, `ValueBox<&E>` |
//! | [`UnionBox2`] … [`UnionBox8`] | one `ValueBox<&Ti>` per alternative |
//! | [`AsyncBox<T>`] | `ValueBox<&T>`, `ValueBox<&str>` error text, live [`ReadinessHandle`] |
//!
//! ## Guarantees
//!
//! - **Exactly one slot**: a `ResultBox` or union box always reports exactly one
//!   present slot; asking a union for an alternative it does not have is a
//!   compile error, not a runtime one.
//! - **At-most-once outcome**: an `AsyncBox` takes its backend's outcome once,
//!   on the first extraction after completion, and serves the cache afterwards.
//! - **No escaping failures**: panics and errors inside an `AsyncBox`
//!   computation are captured as a [`Failure`] and surfaced as text.
//! - **Single owner**: `AsyncBox` is move-only and `!Sync`.
//!
//! ## Backends
//!
//! An `AsyncBox` is built over one of three backends, chosen by constructor
//! and fixed for its lifetime:
//!
//! 1. **Immediate** (`AsyncBox::ready`): the value is already known.
//! 2. **Cooperative** (`AsyncBox::from_future`): a future resumed on the
//!    calling thread, first at construction and then on every poll.
//! 3. **Worker** (`AsyncBox::spawn`): a detached thread that publishes its
//!    outcome through a single-use completion slot and flips the readiness flag.
//!
//! ## Example
//!
//! ```rust
//! use monobox::{AsyncBox, ResultBox, Unexpected};
//! use std::time::Duration;
//!
//! let parsed: ResultBox<u32, String> = Unexpected("not a number".to_string()).into();
//! let parts = parsed.decompose();
//! assert!(!parts.value.is_present());
//!
//! let mut slow = AsyncBox::spawn(|| {
//!     std::thread::sleep(Duration::from_millis(10));
//!     7
//! });
//! let ready = slow.readiness_handle();
//! while !ready.get() {
//!     std::thread::yield_now();
//! }
//! assert_eq!(slow.extract_value().get(), Some(&&7));
//! assert!(!slow.extract_error().is_present());
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod trace;

#[cfg(feature = "proptest")]
pub mod arbitrary;
pub mod concurrency;
pub mod future;
pub mod value;

pub use future::{
    AsyncBox, AsyncParts, AsyncState, Backend, BackendKind, Failure, FailureKind, ReadinessHandle,
    WorkerOptions,
};
pub use value::{
    Alternative, ResultBox, ResultParts, UnionBox2, UnionBox3, UnionBox4, UnionBox5, UnionBox6,
    UnionBox7, UnionBox8, Unexpected, ValueBox, ValueParts,
};

// Compile-time layout checks
const _: () = {
    use core::mem;

    // `ValueBox` is a thin wrapper over `Option`.
    assert!(mem::size_of::<ValueBox<u64>>() == mem::size_of::<Option<u64>>());
    assert!(mem::size_of::<ValueBox<&u64>>() == mem::size_of::<&u64>());

    // `ResultBox` is a thin wrapper over `Result`.
    assert!(mem::size_of::<ResultBox<u64, u32>>() == mem::size_of::<Result<u64, u32>>());

    // The readiness handle is one pointer.
    assert!(mem::size_of::<ReadinessHandle>() == mem::size_of::<usize>());
};
