use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors that can occur in the logging library
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
    /// A date could not be rendered.
    #[error("Time error: {0}")]
    Time(#[from] time::error::Format),
    /// The dated log file could not be opened.
    #[error("cannot create the log file {}: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
