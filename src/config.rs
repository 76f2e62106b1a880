use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Enable `<DEBUG>` lines (and silence `<TRACE>` lines)
    #[serde(default)]
    pub debug: bool,
    /// Append a hex dump of the payload to `<TRACE>` lines
    #[serde(default)]
    pub verbose: bool,
    /// Directory the dated log files are created in
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Where lines go while no log file is open
    #[serde(default)]
    pub fallback: FallbackTarget,
    /// Base name for log files; defaults to the executable name
    #[serde(default)]
    pub process_name: Option<String>,
    /// Prefix each line with a UTC `YYYY/MM/DD HH:MM:SS` stamp
    #[serde(default)]
    pub timestamp: bool,
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self {
            debug: false,
            verbose: false,
            directory: default_directory(),
            fallback: FallbackTarget::default(),
            process_name: None,
            timestamp: false,
        }
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable verbose trace dumps
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the log directory
    pub fn with_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the fallback stream
    pub fn with_fallback(mut self, fallback: FallbackTarget) -> Self {
        self.fallback = fallback;
        self
    }

    /// Override the process name used in log file names
    pub fn with_process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = Some(name.into());
        self
    }

    /// Enable timestamp prefixes
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Check the configuration for values that can never produce a log file.
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(Error::Config("log directory must not be empty".to_string()));
        }
        if let Some(name) = &self.process_name {
            if name.is_empty() {
                return Err(Error::Config("process name must not be empty".to_string()));
            }
            if name.contains(['/', '\\']) {
                return Err(Error::Config(format!(
                    "process name must not contain a path separator: {}",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("log")
}

/// Standard stream used when the dated log file is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackTarget {
    /// Process standard output.
    #[default]
    Stdout,
    /// Process standard error.
    Stderr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_new() {
        let config = LogConfig::new();
        assert!(!config.debug);
        assert!(!config.verbose);
        assert_eq!(config.directory, PathBuf::from("log"));
        assert_eq!(config.fallback, FallbackTarget::Stdout);
        assert!(config.process_name.is_none());
        assert!(!config.timestamp);
    }

    #[test]
    fn test_log_config_default() {
        assert_eq!(LogConfig::default(), LogConfig::new());
    }

    #[test]
    fn test_log_config_chaining() {
        let config = LogConfig::new()
            .with_debug(true)
            .with_verbose(true)
            .with_directory("/var/log/worker")
            .with_fallback(FallbackTarget::Stderr)
            .with_process_name("worker")
            .with_timestamp(true);
        assert!(config.debug);
        assert!(config.verbose);
        assert_eq!(config.directory, PathBuf::from("/var/log/worker"));
        assert_eq!(config.fallback, FallbackTarget::Stderr);
        assert_eq!(config.process_name.as_deref(), Some("worker"));
        assert!(config.timestamp);
    }

    #[test]
    fn test_validate_rejects_empty_directory() {
        let config = LogConfig::new().with_directory("");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_process_name() {
        let config = LogConfig::new().with_process_name("");
        assert!(config.validate().is_err());

        let config = LogConfig::new().with_process_name("bin/worker");
        assert!(config.validate().is_err());

        let config = LogConfig::new().with_process_name("worker");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_yaml_defaults() {
        let config: LogConfig = serde_yaml::from_str("debug: true").unwrap();
        assert!(config.debug);
        assert!(!config.verbose);
        assert_eq!(config.directory, PathBuf::from("log"));
        assert_eq!(config.fallback, FallbackTarget::Stdout);
    }

    #[test]
    fn test_deserialize_yaml_full() {
        let yaml = r#"
debug: false
verbose: true
directory: /tmp/worker-logs
fallback: stderr
process_name: worker
timestamp: true
"#;
        let config: LogConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.verbose);
        assert_eq!(config.directory, PathBuf::from("/tmp/worker-logs"));
        assert_eq!(config.fallback, FallbackTarget::Stderr);
        assert_eq!(config.process_name.as_deref(), Some("worker"));
        assert!(config.timestamp);
    }

    #[test]
    fn test_deserialize_toml() {
        let toml_str = r#"
verbose = true
directory = "logs"
fallback = "stdout"
"#;
        let config: LogConfig = toml::from_str(toml_str).unwrap();
        assert!(config.verbose);
        assert!(!config.debug);
        assert_eq!(config.directory, PathBuf::from("logs"));
    }

    #[test]
    fn test_deserialize_unknown_fallback_fails() {
        let result: std::result::Result<LogConfig, _> = serde_yaml::from_str("fallback: syslog");
        assert!(result.is_err());
    }
}
