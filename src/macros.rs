//! Logging macros.
//!
//! Every macro takes the logger first. Two forms are accepted:
//! - Format string: `info!(logger, "listening on {}", port)`
//! - Loose values joined by spaces: `info!(logger; "listening on", port)`
//!
//! Call-site annotation comes from `#[track_caller]`, so the reported
//! `file:line` is the macro invocation.

/// Plain line without call site or tag.
#[macro_export]
macro_rules! log {
    ($logger:expr; $($value:expr),* $(,)?) => {
        $logger.log(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(&[&::std::format_args!($($arg)+) as &dyn ::std::fmt::Display])
    };
}

/// Formatted line with call site, no tag.
#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf(::std::format_args!($($arg)+))
    };
}

/// `<DEBUG>` line, written only in debug mode.
#[macro_export]
macro_rules! debug {
    ($logger:expr; $($value:expr),* $(,)?) => {
        $logger.debug(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// `<INFO>` line.
#[macro_export]
macro_rules! info {
    ($logger:expr; $($value:expr),* $(,)?) => {
        $logger.info(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// `<WARNING>` line.
#[macro_export]
macro_rules! warning {
    ($logger:expr; $($value:expr),* $(,)?) => {
        $logger.warning(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warningf(::std::format_args!($($arg)+))
    };
}

/// `<ERROR>` line.
#[macro_export]
macro_rules! error {
    ($logger:expr; $($value:expr),* $(,)?) => {
        $logger.error(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// `<TRACE>` line with a payload: `trace!(logger, bytes, "fmt", ..)` or
/// `trace!(logger, bytes; values..)`.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $data:expr; $($value:expr),* $(,)?) => {
        $logger.trace(&$data[..], &[$(&$value as &dyn ::std::fmt::Display),*])
    };
    ($logger:expr, $data:expr, $($arg:tt)+) => {
        $logger.tracef(&$data[..], ::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::LogConfig;
    use crate::writer::Fallback;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use time::macros::datetime;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(config: LogConfig, f: impl FnOnce(&crate::Logger)) -> Vec<String> {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let captured = Captured::default();
        let logger = crate::Logger::from_parts(
            &config.with_directory(blocker.join("log")).with_process_name("m"),
            Fallback::from_writer(Box::new(captured.clone())),
            Box::new(|| datetime!(2024-03-05 00:00 UTC)),
        );
        f(&logger);
        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        text.lines().skip(1).map(str::to_string).collect()
    }

    #[test]
    fn test_value_and_format_forms() {
        let out = lines(LogConfig::new(), |logger| {
            crate::info!(logger; "a", 1, 2.5);
            crate::info!(logger, "b={}", 2);
            crate::warning!(logger; "w",);
            crate::error!(logger, "e");
            crate::log!(logger; "plain", 3);
            crate::log!(logger, "plain {}", 4);
        });
        assert_eq!(out.len(), 6);
        assert!(out[0].ends_with("<INFO> a 1 2.5"));
        assert!(out[1].ends_with("<INFO> b=2"));
        assert!(out[2].ends_with("<WARNING> w"));
        assert!(out[3].ends_with("<ERROR> e"));
        assert_eq!(out[4], "plain 3");
        assert_eq!(out[5], "plain 4");
    }

    #[test]
    fn test_call_site_is_macro_invocation() {
        let mut expected = 0;
        let out = lines(LogConfig::new(), |logger| {
            expected = line!() + 1;
            crate::logf!(logger, "here");
        });
        assert_eq!(out, vec![format!("macros.rs:{} here", expected)]);
    }

    #[test]
    fn test_debug_macro_respects_flag() {
        let out = lines(LogConfig::new(), |logger| {
            crate::debug!(logger, "hidden");
            crate::info!(logger, "shown");
        });
        assert_eq!(out.len(), 1);

        let out = lines(LogConfig::new().with_debug(true), |logger| {
            crate::debug!(logger; "shown", 1);
        });
        assert!(out[0].ends_with("<DEBUG> shown 1"));
    }

    #[test]
    fn test_trace_macro_forms() {
        let out = lines(LogConfig::new().with_verbose(true), |logger| {
            crate::trace!(logger, [0x41u8, 0x42]; "x");
            crate::trace!(logger, b"AB".to_vec(), "y{}", 1);
        });
        assert_eq!(out.len(), 4);
        assert!(out[0].ends_with("<TRACE> x"));
        assert!(out[1].ends_with("|AB|"));
        assert!(out[2].ends_with("<TRACE> y1"));
        assert!(out[3].contains("41 42"));
    }
}
