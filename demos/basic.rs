//! Basic daily-file logging example.
//!
//! This example configures the process-wide logger and writes a few lines
//! into `log/basic.<YYYY-MM-DD>.log`.

use daylog::LogConfig;

fn main() {
    daylog::setup(
        &LogConfig::new()
            .with_verbose(true)
            .with_directory("log")
            .with_timestamp(true),
    );

    let logger = daylog::global();
    daylog::log!(logger; "starting", "basic", "example");
    daylog::info!(logger, "listening on port {}", 8080);
    daylog::warning!(logger; "cache", "miss", "rate", 0.25);
    daylog::error!(logger, "upstream returned {}", 503);
    daylog::debug!(logger, "only visible with debug on");
    daylog::trace!(logger, b"GET / HTTP/1.1\r\n", "request bytes");

    if let Some(path) = logger.current_log_path() {
        daylog::stderrf(format_args!("wrote {}\n", path.display()));
    }
}
