// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logging macros for convenient logging through a handle
//
// All macros format lazily: the format arguments are only evaluated when
// the handle's currently bound target enables the level.

/// Log a formatted message with trace level
///
/// # Examples
/// ```ignore
/// log_trace!(handle, "entering {} with {} items", name, count);
/// ```
#[macro_export]
macro_rules! log_trace {
    ($handle:expr, $($arg:tt)+) => {
        $handle.log_with($crate::Level::Trace, || format!($($arg)+))
    };
}

/// Log a formatted message with debug level
///
/// # Examples
/// ```ignore
/// log_debug!(handle, "cache miss for {}", key);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($handle:expr, $($arg:tt)+) => {
        $handle.log_with($crate::Level::Debug, || format!($($arg)+))
    };
}

/// Log a formatted message with info level
///
/// # Examples
/// ```ignore
/// log_info!(handle, "listener started on {}", addr);
/// ```
#[macro_export]
macro_rules! log_info {
    ($handle:expr, $($arg:tt)+) => {
        $handle.log_with($crate::Level::Info, || format!($($arg)+))
    };
}

/// Log a formatted message with warn level
///
/// # Examples
/// ```ignore
/// log_warn!(handle, "retrying after {} ms", backoff);
/// ```
#[macro_export]
macro_rules! log_warn {
    ($handle:expr, $($arg:tt)+) => {
        $handle.log_with($crate::Level::Warn, || format!($($arg)+))
    };
}

/// Log a formatted message with error level
///
/// # Examples
/// ```ignore
/// log_error!(handle, "failed to open {}", path.display());
/// ```
#[macro_export]
macro_rules! log_error {
    ($handle:expr, $($arg:tt)+) => {
        $handle.log_with($crate::Level::Error, || format!($($arg)+))
    };
}

/// Log a formatted message with fatal level
///
/// # Examples
/// ```ignore
/// log_fatal!(handle, "unrecoverable state: {}", detail);
/// ```
#[macro_export]
macro_rules! log_fatal {
    ($handle:expr, $($arg:tt)+) => {
        $handle.log_with($crate::Level::Fatal, || format!($($arg)+))
    };
}

/// Log a formatted message with audit level (never suppressed)
///
/// # Examples
/// ```ignore
/// log_audit!(handle, "operator {} removed rule {}", user, rule_id);
/// ```
#[macro_export]
macro_rules! log_audit {
    ($handle:expr, $($arg:tt)+) => {
        $handle.log_with($crate::Level::Audit, || format!($($arg)+))
    };
}
