//! Low-level concurrency helpers for the worker backend.
//!
//! Important: these are single-purpose building blocks, not general channels.
//! `completion` carries exactly one outcome from one worker to one box;
//! `parking` lets the box sleep on that slot's state word.

pub mod completion;
pub mod parking;

pub use completion::{completion, Completer, Completion, TakeError};
