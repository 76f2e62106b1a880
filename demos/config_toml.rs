//! Example of loading logging configuration from TOML.
//!
//! Run with:
//! ```bash
//! cargo run --example config_toml
//! ```

use serde::Deserialize;

#[derive(Deserialize)]
struct Config {
    log: daylog::LogConfig,
}

const CONFIG: &str = r#"
[log]
debug = true
verbose = false
directory = "log"
fallback = "stderr"
process_name = "config-demo"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root: Config = toml::from_str(CONFIG)?;

    let logger = daylog::LogBuilder::from_config(root.log).init()?;

    daylog::debug!(logger, "debug lines are on");
    daylog::info!(logger; "loaded", "configuration", "from", "TOML");
    // Trace lines are written only while debug mode is off.
    daylog::trace!(logger, [0u8; 4], "not written");

    Ok(())
}
