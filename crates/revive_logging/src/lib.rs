#![deny(missing_docs)]
//! Shared logging utilities for the Revive workspace.
//!
//! The `revive_*` macros forward to the `log` facade. [`redact_key`] keeps
//! API keys out of log output.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! revive_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! revive_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! revive_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! revive_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! revive_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Masks an API key for logging, keeping only the last four characters.
///
/// Keys of four characters or fewer are masked completely.
pub fn redact_key(key: &str) -> String {
    let trimmed = key.trim();
    let count = trimmed.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = trimmed.chars().skip(count - 4).collect();
    format!("****{tail}")
}

/// Installs a terminal logger for tests, showing only records from the `revive_*` crates.
///
/// Safe to call from every test; only the first call has an effect.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let config = ConfigBuilder::new()
            .add_filter_allow_str("revive")
            .set_time_level(log::LevelFilter::Off)
            .build();
        // Another harness may own the global logger already.
        let _ = TermLogger::init(
            log::LevelFilter::Trace,
            config,
            TerminalMode::Stderr,
            ColorChoice::Never,
        );
    });
}
