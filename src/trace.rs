//! Crate-internal logging hook.
//!
//! With the `tracing` feature on, `trace_event!(debug, ...)` forwards to
//! `tracing::debug!(...)`; with it off the event compiles away.

macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::$level!($($arg)+);
        }
    };
}
