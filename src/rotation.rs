use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::Result;

/// Source of the current UTC time.
///
/// The rotation check asks the clock once per logging call. Tests drive the
/// calendar by plugging in a closure.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now_utc(&self) -> OffsetDateTime;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

impl<F> Clock for F
where
    F: Fn() -> OffsetDateTime + Send + Sync,
{
    fn now_utc(&self) -> OffsetDateTime {
        self()
    }
}

/// Render a date as `YYYY-MM-DD`.
pub fn date_suffix(date: Date) -> Result<String> {
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}

/// Render an instant as the `YYYY/MM/DD HH:MM:SS` line stamp.
pub fn line_stamp(now: OffsetDateTime) -> Result<String> {
    Ok(now.format(format_description!(
        "[year]/[month]/[day] [hour]:[minute]:[second]"
    ))?)
}

/// File name for one day of logs: `<process>.<YYYY-MM-DD>.log`.
pub fn log_file_name(process: &str, date: Date) -> Result<String> {
    Ok(format!("{}.{}.log", process, date_suffix(date)?))
}

/// Full path of the log file for `date` inside `directory`.
pub fn log_file_path(directory: &Path, process: &str, date: Date) -> Result<PathBuf> {
    Ok(directory.join(log_file_name(process, date)?))
}

/// Base name of the running executable, as invoked.
pub fn process_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "daylog".to_string())
}
