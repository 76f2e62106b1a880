//! Builder pattern for configuring a logger.
//!
//! This module provides a convenient builder API for configuring either a
//! standalone [`Logger`] or the process-wide one in a single chain of calls.
//!
//! # Example
//!
//! ```rust,no_run
//! // Configure the process-wide logger
//! let logger = daylog::builder()
//!     .with_debug(false)
//!     .with_verbose(true)
//!     .with_directory("/var/log/worker")
//!     .init()
//!     .expect("Failed to initialize logging");
//!
//! daylog::info!(logger, "listening on {}", 8080);
//! ```

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use crate::rotation::{Clock, SystemClock};
use crate::writer::Fallback;
use crate::{Error, FallbackTarget, LogConfig, Logger, Result};

/// A builder for configuring loggers.
///
/// This provides a fluent interface for setting up the configuration and
/// the pieces that cannot live in a config file: a custom fallback writer
/// and a custom clock.
pub struct LogBuilder {
    config: LogConfig,
    fallback_writer: Option<Box<dyn Write + Send>>,
    clock: Option<Box<dyn Clock>>,
}

impl LogBuilder {
    /// Create a new LogBuilder with default configuration.
    pub fn new() -> Self {
        Self::from_config(LogConfig::new())
    }

    /// Create a LogBuilder from an existing configuration.
    pub fn from_config(config: LogConfig) -> Self {
        Self {
            config,
            fallback_writer: None,
            clock: None,
        }
    }

    /// Enable or disable debug mode.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config = self.config.with_debug(debug);
        self
    }

    /// Enable or disable hex dumps on trace lines.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.config = self.config.with_verbose(verbose);
        self
    }

    /// Set the directory dated log files are created in.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_directory(directory);
        self
    }

    /// Use a standard stream as the fallback.
    pub fn with_fallback(mut self, fallback: FallbackTarget) -> Self {
        self.config = self.config.with_fallback(fallback);
        self.fallback_writer = None;
        self
    }

    /// Use an arbitrary writer as the fallback.
    pub fn with_fallback_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.fallback_writer = Some(Box::new(writer));
        self
    }

    /// Override the process name used in log file names.
    pub fn with_process_name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_process_name(name);
        self
    }

    /// Prefix lines with a UTC timestamp.
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.config = self.config.with_timestamp(timestamp);
        self
    }

    /// Decide the current day with `clock` instead of the system clock.
    ///
    /// Only honored by [`LogBuilder::build_logger`].
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Get the current configuration without building anything.
    pub fn build(self) -> LogConfig {
        self.config
    }

    /// Build a standalone logger.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build_logger(self) -> Result<Logger> {
        self.config.validate()?;

        let fallback = match self.fallback_writer {
            Some(writer) => Fallback::custom(self.config.fallback, writer),
            None => Fallback::new(self.config.fallback),
        };
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));

        Ok(Logger::from_parts(&self.config, fallback, clock))
    }

    /// Configure the process-wide logger and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Invalid configuration is provided
    /// - A custom clock was set (the process-wide logger always uses the
    ///   system clock)
    pub fn init(self) -> Result<&'static Logger> {
        self.config.validate()?;
        if self.clock.is_some() {
            return Err(Error::Init(
                "the process-wide logger cannot use a custom clock".to_string(),
            ));
        }

        let logger = crate::global();
        logger.configure(&self.config);
        if let Some(writer) = self.fallback_writer {
            logger.set_fallback_writer(writer);
        }
        Ok(logger)
    }

    /// Configure the process-wide logger and route `tracing` events to it.
    ///
    /// # Errors
    ///
    /// Same as [`LogBuilder::init`], plus failure to install the global
    /// `tracing` subscriber.
    pub fn init_tracing(self) -> Result<&'static Logger> {
        let logger = self.init()?;
        crate::init_tracing(logger)?;
        Ok(logger)
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogBuilder")
            .field("config", &self.config)
            .field("fallback_writer", &self.fallback_writer.is_some())
            .field("clock", &self.clock.is_some())
            .finish()
    }
}
