//! # Daylog
//!
//! A small leveled logging facade that writes to a log file rotated every
//! UTC day.
//!
//! ## Features
//!
//! - `<DEBUG>`, `<INFO>`, `<WARNING>`, `<ERROR>` and `<TRACE>` lines prefixed
//!   with the caller's `file:line`
//! - One file per UTC day: `<directory>/<process>.<YYYY-MM-DD>.log`
//! - Falls back to standard output when the log file cannot be created
//! - Hex dumps of trace payloads in verbose mode
//! - Optional bridge from the `tracing` ecosystem into the same daily file
//!
//! ## Example
//!
//! ```rust,no_run
//! use daylog::LogConfig;
//!
//! daylog::setup(&LogConfig::new().with_debug(true).with_directory("log"));
//!
//! let logger = daylog::global();
//! daylog::info!(logger, "listening on {}", 8080);
//! daylog::debug!(logger; "peer", "10.0.0.7", "connected");
//! daylog::trace!(logger, b"\x01\x02hello"; "received frame");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod hexdump;
pub mod logger;
mod macros;
pub mod rotation;
pub mod tracing_init;
pub mod writer;

use once_cell::sync::Lazy;

pub use builder::LogBuilder;
pub use config::{FallbackTarget, LogConfig};
pub use error::{Error, Result};
pub use hexdump::hex_dump;
pub use logger::{CallSite, Level, Logger, stderr, stderrf};
pub use rotation::{Clock, SystemClock};
pub use tracing_init::{init_tracing, tracing_layer};
pub use writer::{LogWriter, Sink};

static GLOBAL: Lazy<Logger> = Lazy::new(Logger::default);

/// The process-wide logger, created with default settings on first use.
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Configure the process-wide logger.
///
/// Call once at startup, before other threads start logging.
pub fn setup(config: &LogConfig) {
    GLOBAL.configure(config);
}

/// Whether the process-wide logger is in debug mode.
pub fn is_debug() -> bool {
    GLOBAL.is_debug()
}

/// Start building a logger configuration.
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}
