//! Worker-thread configuration.

use std::io;
use std::thread::{self, JoinHandle};

/// Default name given to worker threads.
pub const DEFAULT_WORKER_NAME: &str = "monobox-worker";

/// How a worker-backed [`AsyncBox`](crate::AsyncBox) starts its thread.
///
/// ```rust
/// use monobox::{AsyncBox, WorkerOptions};
///
/// let options = WorkerOptions::new().name("checksum").stack_size(256 * 1024);
/// let mut task = AsyncBox::spawn_with(&options, || 40 + 2);
/// task.wait();
/// assert_eq!(task.extract_value().get(), Some(&&42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerOptions {
    name: String,
    stack_size: Option<usize>,
}

impl WorkerOptions {
    /// Options with the default thread name and the platform stack size.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_WORKER_NAME.to_string(),
            stack_size: None,
        }
    }

    /// Sets the worker thread name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the worker stack size in bytes.
    #[must_use]
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// The configured thread name.
    pub fn thread_name(&self) -> &str {
        &self.name
    }

    pub(crate) fn spawn<F>(&self, body: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut builder = thread::Builder::new().name(self.name.clone());
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        builder.spawn(body)
    }
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let options = WorkerOptions::default();
        assert_eq!(options.thread_name(), DEFAULT_WORKER_NAME);
        assert_eq!(options, WorkerOptions::new());
    }

    #[test]
    fn test_spawned_thread_carries_name() {
        let options = WorkerOptions::new().name("probe");
        let (tx, rx) = std::sync::mpsc::channel();
        let handle = options
            .spawn(move || {
                let name = thread::current().name().map(str::to_owned);
                tx.send(name).unwrap();
            })
            .unwrap();
        handle.join().unwrap();
        assert_eq!(rx.recv().unwrap().as_deref(), Some("probe"));
    }
}
