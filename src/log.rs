//! Logging shims for the engine.
//!
//! With the `tracing` feature on, `debug!` and `warn!` are the `tracing`
//! macros. Without it they swallow their arguments, so the snap, intersect
//! and chop paths can log unconditionally. Neither leaks into the public
//! macro namespace.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

// `warn` alone would clash with the built-in lint attribute of that name
#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use log_debug as debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use log_warn as warn;
