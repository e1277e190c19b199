// Conditional logging macros - only active in debug builds

use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::Path;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const DEFAULT_FILTER: &str = "warn";

/// Where log records go.
pub enum LogTarget<'a> {
    Stderr,
    /// Append to a file; used while the TUI owns the terminal.
    File(&'a Path),
}

/// Installs the global logger. `RUST_LOG` overrides the default `warn` filter.
///
/// Falls back to stderr if the log file cannot be opened.
pub fn init_logging(target: LogTarget<'_>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let LogTarget::File(path) = target {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Could not open log file '{}': {e}", path.display()),
        }
    }
    // A logger may already be installed (tests, repeated init).
    let _ = builder.try_init();
}
