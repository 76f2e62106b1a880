//! Route `tracing` events into the daily log file.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = daylog::builder()
        .with_directory("log")
        .with_process_name("tracing-demo")
        .init_tracing()?;

    tracing::info!(user = "alice", action = "login", "User performed an action");
    tracing::warn!(error_code = 404, path = "/api/users", "Resource not found");
    daylog::info!(logger, "facade and tracing share {}", "one file");

    Ok(())
}
