//! The asynchronous result box and its execution backends.
//!
//! - `async_box` holds the state machine and the decomposition protocol.
//! - `backend` holds the immediate, cooperative and worker-thread backends.
//! - `failure`, `options` and `readiness` are the supporting types.

pub mod async_box;
pub mod backend;
pub mod failure;
pub mod options;
pub mod readiness;

pub use async_box::{AsyncBox, AsyncParts, AsyncState};
pub use backend::{Backend, BackendKind};
pub use failure::{Failure, FailureKind};
pub use options::{WorkerOptions, DEFAULT_WORKER_NAME};
pub use readiness::ReadinessHandle;
