#![deny(missing_docs)]
//! Shared logging utilities for the crawler workspace.
//!
//! This crate provides the `crawl_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every macro logs under
//! the [`TARGET`] target so the binary can filter crawler output from the
//! noise of the HTTP stack.

/// Log target shared by all crawler crates.
pub const TARGET: &str = "jobcrawl";

/// Logs a trace-level message under the crawler target.
#[macro_export]
macro_rules! crawl_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the crawler target.
#[macro_export]
macro_rules! crawl_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the crawler target.
#[macro_export]
macro_rules! crawl_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the crawler target.
#[macro_export]
macro_rules! crawl_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the crawler target.
#[macro_export]
macro_rules! crawl_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Initializes a terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized, so
/// every test can call it unconditionally.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Only crawler output; reqwest/hyper are too chatty at debug level.
    let config = ConfigBuilder::new().add_filter_allow_str(TARGET).build();

    let _ = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto);
}
