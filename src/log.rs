//! Logging shim.
//!
//! With the `tracing` feature the renderer and net builder log through `tracing`;
//! without it every macro below expands to nothing, arguments included, so a
//! build without the feature pays nothing for diagnostics.
//!
//! Use as `crate::log::warn!(uuid = %wire.uuid, "zero-length wire")`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __kisvg_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __kisvg_trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __kisvg_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{__kisvg_debug as debug, __kisvg_trace as trace, __kisvg_warn as warn};
