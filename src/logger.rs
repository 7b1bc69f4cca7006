//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only shows with `--verbose`
//! - `Diagnostics` sink handed to the resolvers, so resolution code never
//!   touches the process-wide logger directly
//!
//! # Example
//!
//! ```ignore
//! log!("serve"; "http://{}", addr);
//! debug!("404"; "serving custom page: {}", path.display());
//! ```

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Serializes lines written from request worker threads.
static OUTPUT: Mutex<()> = Mutex::new(());

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let _guard = OUTPUT.lock();
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" => prefix.bright_blue().bold().to_string(),
        "redirect" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Diagnostics sink
// ============================================================================

/// Destination for diagnostics emitted while resolving a request.
///
/// The server passes [`LogSink`]; tests pass a recorder and assert on it.
pub trait Diagnostics: Send + Sync {
    /// Something unexpected that did not stop resolution.
    fn warn(&self, module: &str, message: &str);

    /// Trace-level detail, only useful when debugging resolution.
    fn debug(&self, module: &str, message: &str);
}

/// Forwards diagnostics to the terminal logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl Diagnostics for LogSink {
    fn warn(&self, module: &str, message: &str) {
        log("warning", &format!("{module}: {message}"));
    }

    fn debug(&self, module: &str, message: &str) {
        if is_verbose() {
            log(module, message);
        }
    }
}

/// Keeps every diagnostic in memory, in emission order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub warnings: Mutex<Vec<String>>,
    pub debugs: Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }
}

#[cfg(test)]
impl Diagnostics for RecordingSink {
    fn warn(&self, module: &str, message: &str) {
        self.warnings.lock().push(format!("[{module}] {message}"));
    }

    fn debug(&self, module: &str, message: &str) {
        self.debugs.lock().push(format!("[{module}] {message}"));
    }
}

// ============================================================================
// Tests
// ============================================================================
