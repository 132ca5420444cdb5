//! Operator console entry point.
mod command;
mod console;

use std::io;

use anyhow::Result;
use console::Console;
use hunt_bootstrap::{HuntConfig, ServiceBuilder};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = HuntConfig::from_env();

    // Logs go to a file so they never interleave with console output
    let _guard = setup_logging(&config)?;

    let setup = ServiceBuilder::new(config).build()?;
    println!("QR hunt console. Type 'help' for commands.");

    Console::new(setup.service).run(io::stdin().lock(), io::stdout().lock())
}

/// Setup logging to `<data_dir>/<log_file>`.
///
/// The returned guard flushes the non-blocking writer when dropped.
fn setup_logging(config: &HuntConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(&config.data_dir)?;

    let file_appender = tracing_appender::rolling::never(&config.data_dir, &config.log_file);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: {}", config.log_path().display());

    Ok(guard)
}
