#![deny(missing_docs)]
//! Shared logging setup for the clubsite workspace.
//!
//! Library crates log through the `log` facade; this crate owns the
//! `simplelog` initialization used by binaries and tests.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Initializes a terminal logger at the given level.
///
/// Safely no-ops if a logger has already been installed.
pub fn initialize(level: LevelFilter) {
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

/// Initializes a terminal logger for use in tests.
///
/// Uses debug level in debug builds, info in release builds. Safe to call
/// from every test; only the first call installs a logger.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    initialize(level);
}
