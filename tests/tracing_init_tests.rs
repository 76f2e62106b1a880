//! Installing the global subscriber. Kept in its own test binary because the
//! subscriber can be set only once per process.

use daylog::{Error, LogBuilder, Logger};
use time::macros::datetime;

#[test]
fn test_init_tracing_installs_once() {
    // SAFETY: this binary runs a single test, so no other thread reads the
    // environment concurrently.
    unsafe { std::env::remove_var("RUST_LOG") };

    let tmp = tempfile::tempdir().expect("tempdir");
    let logger = LogBuilder::new()
        .with_directory(tmp.path())
        .with_process_name("init")
        .with_clock(|| datetime!(2024-03-05 12:00 UTC))
        .build_logger()
        .expect("build logger");
    let logger: &'static Logger = Box::leak(Box::new(logger));

    assert!(daylog::init_tracing(logger).is_ok());
    assert!(matches!(daylog::init_tracing(logger), Err(Error::Init(_))));

    tracing::info!("init-test: global subscriber");
    tracing::debug!("init-test: below the default level");

    let text = std::fs::read_to_string(tmp.path().join("init.2024-03-05.log"))
        .expect("read log file");
    assert!(text.contains("init-test: global subscriber"));
    assert!(!text.contains("below the default level"));
}
