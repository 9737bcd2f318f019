//! Logging macros for the prioritization passes with verbosity level control.
//!
//! Events are emitted through `tracing`, so they only show up when a
//! subscriber is installed and the verbosity on the config allows them.
//! - 0: SILENT
//! - 1: CHANGES (penalties applied, final ranking)
//! - 2: CHECKS (per-task adjustments, clamped inputs)
//! - 3: DEBUG (full score arithmetic)

use tracing_subscriber::{fmt, EnvFilter};

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            ::tracing::info!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            ::tracing::debug!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            ::tracing::trace!($($arg)*);
        }
    };
}

/// Filter used when `RUST_LOG` is unset. Verbosity does the gating, so
/// every level from this crate is let through.
const DEFAULT_FILTER: &str = "taskrank=trace";

/// Install a stderr fmt subscriber filtered by `RUST_LOG`.
///
/// Called when the Python module is imported. Safe to call more than once;
/// later calls (or a subscriber the host already installed) win.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}
