//! The logging facade.
//!
//! A [`Logger`] owns the debug/verbose switches, the daily log file and the
//! fallback stream. Every call that produces output first runs the rotation
//! check, then writes one complete line (plus an optional hex dump) with a
//! single write.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::panic::Location;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use time::Date;

use crate::config::LogConfig;
use crate::hexdump::hex_dump;
use crate::rotation::{self, Clock, SystemClock};
use crate::writer::{DailyFile, Fallback, LogWriter, Sink};

/// Level tag written after the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Trace,
}

impl Level {
    /// The bracketed tag, e.g. `<INFO>`.
    pub fn tag(self) -> &'static str {
        match self {
            Level::Debug => "<DEBUG>",
            Level::Info => "<INFO>",
            Level::Warning => "<WARNING>",
            Level::Error => "<ERROR>",
            Level::Trace => "<TRACE>",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Source location of a logging call, rendered as `file:line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    /// Location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }

    /// Source path with everything up to the last `src/` removed.
    pub fn file(&self) -> &'static str {
        trim_source_path(self.file)
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file(), self.line)
    }
}

/// Strip the path up to and including the last `src/` segment, if any.
pub fn trim_source_path(file: &str) -> &str {
    file.rsplit("src/").next().unwrap_or(file)
}

/// Body of a line: either loose values joined by spaces, or a format.
#[derive(Clone, Copy)]
enum Message<'a> {
    Values(&'a [&'a dyn fmt::Display]),
    Format(fmt::Arguments<'a>),
}

/// Leveled logger writing to a file that rotates each UTC day.
pub struct Logger {
    debug: AtomicBool,
    verbose: AtomicBool,
    timestamp: AtomicBool,
    daily: DailyFile,
    fallback: Fallback,
}

impl Logger {
    /// Create a logger from `config`, using the system clock.
    pub fn new(config: &LogConfig) -> Self {
        Self::from_parts(config, Fallback::new(config.fallback), Box::new(SystemClock))
    }

    pub(crate) fn from_parts(config: &LogConfig, fallback: Fallback, clock: Box<dyn Clock>) -> Self {
        Self {
            debug: AtomicBool::new(config.debug),
            verbose: AtomicBool::new(config.verbose),
            timestamp: AtomicBool::new(config.timestamp),
            daily: DailyFile::new(config.directory.clone(), process_name_for(config), clock),
            fallback,
        }
    }

    /// Apply `config`: flags, log directory, process name and fallback stream.
    ///
    /// Not synchronized with concurrent logging calls; configure before
    /// handing the logger to worker threads. A file already open for today
    /// stays in use until the day changes. The fallback writer is replaced
    /// only when `config.fallback` names a different stream, so a writer set
    /// with [`Logger::set_fallback_writer`] survives reconfiguration.
    pub fn configure(&self, config: &LogConfig) {
        self.debug.store(config.debug, Ordering::Relaxed);
        self.verbose.store(config.verbose, Ordering::Relaxed);
        self.timestamp.store(config.timestamp, Ordering::Relaxed);
        self.daily
            .relocate(config.directory.clone(), process_name_for(config));
        self.fallback.retarget(config.fallback);
    }

    /// Replace the fallback stream with an arbitrary writer.
    pub fn set_fallback_writer(&self, writer: Box<dyn Write + Send>) {
        self.fallback.replace(writer);
    }

    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Path of the log file currently receiving lines, if one is open.
    pub fn current_log_path(&self) -> Option<PathBuf> {
        self.daily.current_path()
    }

    /// UTC date of the last rotation check that changed the day.
    pub fn current_day(&self) -> Option<Date> {
        self.daily.current_day()
    }

    /// An `io::Write` handle onto this logger's sink.
    pub fn writer(&self) -> LogWriter<'_> {
        LogWriter::new(self)
    }

    /// Plain line: values joined by spaces, no call site, no tag.
    pub fn log(&self, values: &[&dyn fmt::Display]) {
        self.emit(None, Message::Values(values), None);
    }

    /// Formatted line prefixed with the call site.
    #[track_caller]
    pub fn logf(&self, args: fmt::Arguments<'_>) {
        let site = CallSite::caller();
        self.emit(Some(site.to_string()), Message::Format(args), None);
    }

    /// `<DEBUG>` line; only written in debug mode.
    #[track_caller]
    pub fn debug(&self, values: &[&dyn fmt::Display]) {
        if !self.is_debug() {
            return;
        }
        self.tagged(CallSite::caller(), Level::Debug, Message::Values(values));
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        if !self.is_debug() {
            return;
        }
        self.tagged(CallSite::caller(), Level::Debug, Message::Format(args));
    }

    #[track_caller]
    pub fn info(&self, values: &[&dyn fmt::Display]) {
        self.tagged(CallSite::caller(), Level::Info, Message::Values(values));
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.tagged(CallSite::caller(), Level::Info, Message::Format(args));
    }

    #[track_caller]
    pub fn warning(&self, values: &[&dyn fmt::Display]) {
        self.tagged(CallSite::caller(), Level::Warning, Message::Values(values));
    }

    #[track_caller]
    pub fn warningf(&self, args: fmt::Arguments<'_>) {
        self.tagged(CallSite::caller(), Level::Warning, Message::Format(args));
    }

    #[track_caller]
    pub fn error(&self, values: &[&dyn fmt::Display]) {
        self.tagged(CallSite::caller(), Level::Error, Message::Values(values));
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.tagged(CallSite::caller(), Level::Error, Message::Format(args));
    }

    /// `<TRACE>` line followed, in verbose mode, by a hex dump of `data`.
    ///
    /// Written only while debug mode is off.
    #[track_caller]
    pub fn trace(&self, data: &[u8], values: &[&dyn fmt::Display]) {
        if self.is_debug() {
            return;
        }
        self.traced(CallSite::caller(), data, Message::Values(values));
    }

    #[track_caller]
    pub fn tracef(&self, data: &[u8], args: fmt::Arguments<'_>) {
        if self.is_debug() {
            return;
        }
        self.traced(CallSite::caller(), data, Message::Format(args));
    }

    fn tagged(&self, site: CallSite, level: Level, message: Message<'_>) {
        self.emit(Some(format!("{} {}", site, level)), message, None);
    }

    fn traced(&self, site: CallSite, data: &[u8], message: Message<'_>) {
        let dump = self.is_verbose().then(|| hex_dump(data));
        self.emit(
            Some(format!("{} {}", site, Level::Trace)),
            message,
            dump.as_deref(),
        );
    }

    fn emit(&self, head: Option<String>, message: Message<'_>, trailer: Option<&str>) {
        let mut line = self.render(head, message);
        if let Some(trailer) = trailer {
            line.push_str(trailer);
        }
        let _ = self.write_bytes(line.as_bytes());
    }

    fn render(&self, head: Option<String>, message: Message<'_>) -> String {
        let mut line = String::with_capacity(128);

        if self.timestamp.load(Ordering::Relaxed)
            && let Ok(stamp) = rotation::line_stamp(self.daily.now_utc())
        {
            line.push_str(&stamp);
            line.push(' ');
        }

        let mut separate = false;
        if let Some(head) = head {
            line.push_str(&head);
            separate = true;
        }

        match message {
            Message::Values(values) => {
                for value in values {
                    if separate {
                        line.push(' ');
                    }
                    let _ = write!(line, "{}", value);
                    separate = true;
                }
            }
            Message::Format(args) => {
                if separate {
                    line.push(' ');
                }
                let _ = line.write_fmt(args);
            }
        }

        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }

    /// Run the rotation check, then write `bytes` to the resulting sink.
    pub(crate) fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        match self.daily.ensure_current(&self.fallback) {
            Sink::File(file) => (&*file).write_all(bytes),
            Sink::Fallback => self.fallback.write_line(bytes),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(&LogConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("debug", &self.is_debug())
            .field("verbose", &self.is_verbose())
            .field("daily", &self.daily)
            .finish_non_exhaustive()
    }
}

fn process_name_for(config: &LogConfig) -> String {
    config
        .process_name
        .clone()
        .unwrap_or_else(rotation::process_name)
}

/// Write values, joined by spaces, straight to standard error.
pub fn stderr(values: &[&dyn fmt::Display]) {
    let _ = write_values_line(&mut io::stderr(), values);
}

/// Write a formatted message straight to standard error, without a newline.
pub fn stderrf(args: fmt::Arguments<'_>) {
    let _ = write_format(&mut io::stderr(), args);
}

/// Values joined by single spaces, terminated by a newline.
fn write_values_line<W: Write>(out: &mut W, values: &[&dyn fmt::Display]) -> io::Result<()> {
    let mut line = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{}", value);
    }
    line.push('\n');
    out.write_all(line.as_bytes())
}

/// The formatted message as-is; no newline is added.
fn write_format<W: Write>(out: &mut W, args: fmt::Arguments<'_>) -> io::Result<()> {
    out.write_fmt(args)
}
