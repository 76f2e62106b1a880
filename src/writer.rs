use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use time::{Date, OffsetDateTime};

use crate::config::FallbackTarget;
use crate::rotation::{self, Clock};
use crate::{Error, Logger, Result};

/// Destination for one line, as resolved by the rotation check.
#[derive(Debug, Clone)]
pub enum Sink {
    /// Today's log file.
    File(Arc<File>),
    /// The fallback stream; no log file has been opened yet.
    Fallback,
}

/// Stream that receives lines while no log file is open, and the
/// diagnostic when a log file cannot be created.
pub struct Fallback {
    inner: Mutex<FallbackState>,
}

struct FallbackState {
    writer: Box<dyn Write + Send>,
    /// Configured target the writer stands for.
    target: FallbackTarget,
}

impl Fallback {
    /// Fallback bound to a standard stream.
    pub fn new(target: FallbackTarget) -> Self {
        Self::custom(target, target_writer(target))
    }

    /// Fallback bound to an arbitrary writer, standing in for the default target.
    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self::custom(FallbackTarget::default(), writer)
    }

    /// Fallback bound to an arbitrary writer, standing in for `target`.
    pub fn custom(target: FallbackTarget, writer: Box<dyn Write + Send>) -> Self {
        Self {
            inner: Mutex::new(FallbackState { writer, target }),
        }
    }

    /// Swap the underlying writer, keeping the configured target.
    pub fn replace(&self, writer: Box<dyn Write + Send>) {
        let mut guard = lock(&self.inner);
        let _ = guard.writer.flush();
        guard.writer = writer;
    }

    /// Point the fallback at `target`. The current writer is kept when the
    /// target is unchanged, so a custom writer survives reconfiguration.
    pub fn retarget(&self, target: FallbackTarget) {
        let mut guard = lock(&self.inner);
        if guard.target == target {
            return;
        }
        let _ = guard.writer.flush();
        guard.writer = target_writer(target);
        guard.target = target;
    }

    /// Configured target of the fallback.
    pub fn target(&self) -> FallbackTarget {
        lock(&self.inner).target
    }

    /// Write a complete line and flush it.
    pub fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut guard = lock(&self.inner);
        guard.writer.write_all(line)?;
        guard.writer.flush()
    }
}

impl std::fmt::Debug for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fallback")
            .field("target", &self.target())
            .finish_non_exhaustive()
    }
}

pub(crate) fn target_writer(target: FallbackTarget) -> Box<dyn Write + Send> {
    match target {
        FallbackTarget::Stdout => Box::new(io::stdout()),
        FallbackTarget::Stderr => Box::new(io::stderr()),
    }
}

/// Target of the events emitted by the rotation check. The tracing bridge
/// drops it so those events never land in the sink they describe.
pub const ROTATION_TARGET: &str = "daylog::rotation";

/// Rotation state guarded by the single rotation lock.
#[derive(Debug)]
struct DayState {
    /// UTC date the current file was opened for; `None` until the first check.
    day: Option<Date>,
    /// The open log file, if any rotation ever succeeded.
    file: Option<Arc<File>>,
    /// Path of `file`.
    path: Option<PathBuf>,
    directory: PathBuf,
    process_name: String,
}

impl DayState {
    fn sink(&self) -> Sink {
        match &self.file {
            Some(file) => Sink::File(Arc::clone(file)),
            None => Sink::Fallback,
        }
    }
}

/// Daily log file: opens `<directory>/<process>.<YYYY-MM-DD>.log` the first
/// time it is used on each UTC day.
pub struct DailyFile {
    state: Mutex<DayState>,
    clock: Box<dyn Clock>,
}

impl DailyFile {
    /// Create a daily file; nothing is opened until the first check.
    pub fn new(directory: PathBuf, process_name: String, clock: Box<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(DayState {
                day: None,
                file: None,
                path: None,
                directory,
                process_name,
            }),
            clock,
        }
    }

    /// Change where future rotations create files. The open file, if any,
    /// stays in use until the day changes.
    pub fn relocate(&self, directory: PathBuf, process_name: String) {
        let mut state = lock(&self.state);
        state.directory = directory;
        state.process_name = process_name;
    }

    /// Current instant according to the rotation clock.
    pub fn now_utc(&self) -> OffsetDateTime {
        self.clock.now_utc()
    }

    /// Date of the last rotation check that changed the day.
    pub fn current_day(&self) -> Option<Date> {
        lock(&self.state).day
    }

    /// Path of the file currently receiving lines.
    pub fn current_path(&self) -> Option<PathBuf> {
        lock(&self.state).path.clone()
    }

    /// Return the sink for today, rotating first if the UTC day changed.
    ///
    /// At most one open attempt happens per day. When the open fails the
    /// diagnostic goes to `fallback` and the previous sink stays active.
    pub fn ensure_current(&self, fallback: &Fallback) -> Sink {
        let today = self.clock.now_utc().date();

        let mut state = lock(&self.state);
        if state.day == Some(today) {
            return state.sink();
        }
        state.day = Some(today);

        match open_day_file(&state.directory, &state.process_name, today) {
            Ok((path, file)) => {
                if let Some(previous) = state.file.take() {
                    let _ = previous.sync_all();
                }
                state.file = Some(Arc::new(file));
                state.path = Some(path.clone());
                let sink = state.sink();
                drop(state);

                tracing::debug!(
                    target: ROTATION_TARGET,
                    path = %path.display(),
                    "opened daily log file"
                );
                sink
            }
            Err(err) => {
                let sink = state.sink();
                drop(state);

                let _ = fallback.write_line(format!("{}\n", err).as_bytes());
                tracing::warn!(
                    target: ROTATION_TARGET,
                    error = %err,
                    "daily log file unavailable"
                );
                sink
            }
        }
    }
}

impl std::fmt::Debug for DailyFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyFile")
            .field("state", &*lock(&self.state))
            .finish_non_exhaustive()
    }
}

/// Open (creating if needed) the log file for `date` in append mode.
fn open_day_file(directory: &Path, process_name: &str, date: Date) -> Result<(PathBuf, File)> {
    let path = rotation::log_file_path(directory, process_name, date)?;

    let unavailable = |source| Error::SinkUnavailable {
        path: path.clone(),
        source,
    };

    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory).map_err(unavailable)?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    let file = options.open(&path).map_err(unavailable)?;

    Ok((path, file))
}

/// `io::Write` adapter that sends raw bytes through a [`Logger`]'s sink,
/// rotating first like any other logging call.
///
/// This is the writer handed to `tracing-subscriber`.
#[derive(Debug)]
pub struct LogWriter<'a> {
    logger: &'a Logger,
}

impl<'a> LogWriter<'a> {
    pub(crate) fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }
}

impl Write for LogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.logger.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
