use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::writer::ROTATION_TARGET;
use crate::{Error, Logger, Result};

/// Install a global `tracing` subscriber whose output goes to `logger`'s
/// daily file, so `tracing::info!` and friends share the dated log with the
/// facade's own lines.
///
/// `RUST_LOG` takes precedence; otherwise the filter follows the logger's
/// debug/verbose flags at the time of the call.
pub fn init_tracing(logger: &'static Logger) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let log_spec = effective_log_spec(rust_log.as_deref(), logger.is_debug(), logger.is_verbose());

    let env_filter = EnvFilter::try_new(&log_spec).map_err(|e| Error::Init(e.to_string()))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_layer(logger))
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

/// A plain-text `fmt` layer writing through `logger`.
///
/// Events from the logger's own rotation check are left out: the failure
/// diagnostic already goes to the fallback stream once per day.
pub fn tracing_layer<S>(logger: &'static Logger) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(move || logger.writer())
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_filter(filter_fn(|metadata| metadata.target() != ROTATION_TARGET))
}

/// Determine the filter directive from `RUST_LOG` and the logger flags.
fn effective_log_spec(rust_log: Option<&str>, debug: bool, verbose: bool) -> String {
    // RUST_LOG takes precedence over everything
    if let Some(rust_log) = rust_log
        && !rust_log.is_empty()
    {
        return rust_log.to_string();
    }

    match (debug, verbose) {
        (true, true) => "trace",
        (true, false) => "debug",
        (false, _) => "info",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_flags() {
        assert_eq!(effective_log_spec(Some("warn"), true, true), "warn");
    }

    #[test]
    fn empty_rust_log_is_ignored() {
        assert_eq!(effective_log_spec(Some(""), false, false), "info");
    }

    #[test]
    fn flags_select_level() {
        assert_eq!(effective_log_spec(None, false, false), "info");
        assert_eq!(effective_log_spec(None, false, true), "info");
        assert_eq!(effective_log_spec(None, true, false), "debug");
        assert_eq!(effective_log_spec(None, true, true), "trace");
    }
}
