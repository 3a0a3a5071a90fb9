//! Logging macros
//!
//! Linux kernel-style logging macros (`pr_*`) forwarding to the `log` facade.
//!
//! # Usage
//!
//! ```rust,ignore
//! pr_info!("procfs initialized");
//! pr_warn!("write to {:#x} rejected", ino);
//! pr_debug!("node {:#x} created", ino);
//! ```
//!
//! Level filtering is left to the installed logger: a disabled level never
//! formats its arguments.

/// Internal implementation macro
#[doc(hidden)]
#[macro_export]
macro_rules! __pr_impl {
    ($level:expr, $($arg:tt)*) => {
        ::log::log!(target: $crate::log::LOG_TARGET, $level, $($arg)*)
    };
}

/// Logs a message at the ERROR level
#[macro_export]
macro_rules! pr_err {
    ($($arg:tt)*) => {
        $crate::__pr_impl!(::log::Level::Error, $($arg)*)
    };
}

/// Logs a message at the WARNING level
#[macro_export]
macro_rules! pr_warn {
    ($($arg:tt)*) => {
        $crate::__pr_impl!(::log::Level::Warn, $($arg)*)
    };
}

/// Logs a message at the INFO level
#[macro_export]
macro_rules! pr_info {
    ($($arg:tt)*) => {
        $crate::__pr_impl!(::log::Level::Info, $($arg)*)
    };
}

/// Logs a message at the DEBUG level
///
/// Used for high-volume events such as node creation and stale reads.
#[macro_export]
macro_rules! pr_debug {
    ($($arg:tt)*) => {
        $crate::__pr_impl!(::log::Level::Debug, $($arg)*)
    };
}
