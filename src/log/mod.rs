//! Logging
//!
//! procfs does not own a log sink. Messages go through the [`log`](::log) facade
//! under the [`LOG_TARGET`] target, and the embedding kernel decides where they end up.
//! Use the `pr_*` macros instead of calling the facade directly.

#[macro_use]
pub mod macros;

/// Target attached to every record emitted by this crate
pub const LOG_TARGET: &str = "procfs";
