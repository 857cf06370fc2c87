#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names
)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod app;
mod cli;

use cli::commands::Cli;
use retention_probe::Config;

const LOG_ENV: &str = "RETENTION_PROBE_LOG";

/// `-v` flags win over `RETENTION_PROBE_LOG`; WARN keeps the recap readable.
fn log_level(verbose: u8, env_level: Option<&str>) -> Level {
    match verbose {
        0 => env_level
            .and_then(|raw| raw.trim().parse::<Level>().ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Both ring and aws-lc-rs may be linked; pick one explicitly for rustls.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();

    let env_level = std::env::var(LOG_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose, env_level.as_deref()))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = Config::load_or_default()?;
    app::dispatch::dispatch(cli, config).await
}
