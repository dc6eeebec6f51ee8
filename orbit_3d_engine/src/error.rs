//! Error types for the Orbit3D engine
//!
//! Two failure classes exist in the engine and they are never mixed:
//!
//! - **Recoverable**: the operation is skipped, a log line is emitted and an
//!   `Error` is returned (invalid viewport, missing uniform, empty layout...).
//! - **Fatal**: programmer errors such as a duplicate library name. These log
//!   with file:line and panic through `engine_fatal!`.

use std::fmt;

/// Result type for Orbit3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Orbit3D engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (OpenGL, ...)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, shader, mesh...)
    InvalidResource(String),

    /// Initialization failed (device, renderer, subsystems)
    InitializationFailed(String),

    /// Argument rejected, the call was a no-op
    InvalidArgument(String),

    /// Uniform not present in the linked program
    UniformNotFound(String),

    /// File could not be read or decoded
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::UniformNotFound(name) => write!(f, "Uniform not found: {}", name),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR and build an `Error` value.
///
/// The variant defaults to `BackendError`; another variant carrying a message
/// can be selected with `Variant =>`.
///
/// # Example
///
/// ```no_run
/// # use orbit_3d_engine::engine_err;
/// let a = engine_err!("orbit3d::opengl", "glCreateBuffer failed: {}", "oom");
/// let b = engine_err!("orbit3d::Texture", Io => "cannot open {}", "wall.png");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident => $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::orbit3d::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {
        $crate::engine_err!($source, BackendError => $($arg)*)
    };
}

/// Log an ERROR and return `Err(...)` from the current function.
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

/// Log a WARN and build an `Error` value (logged-and-skipped failures).
///
/// The variant defaults to `InvalidArgument`.
#[macro_export]
macro_rules! engine_warn_err {
    ($source:expr, $variant:ident => $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_warn!($source, "{}", message);
        $crate::orbit3d::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {
        $crate::engine_warn_err!($source, InvalidArgument => $($arg)*)
    };
}

/// Log a WARN and return `Err(...)` from the current function.
#[macro_export]
macro_rules! engine_bail_warn {
    ($($arg:tt)*) => {
        return Err($crate::engine_warn_err!($($arg)*))
    };
}

/// Log an ERROR with file:line and panic.
///
/// Reserved for states that can only come from a programming error
/// (duplicate registry names, lookups of names never registered, raw enum
/// values that do not exist).
#[macro_export]
macro_rules! engine_fatal {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        panic!("[{}] {}", $source, message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
