use std::process::ExitCode;

use anyhow::{Context, Result};
use packwise_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use packwise_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        Compact => builder.compact().init(),
        Pretty => builder.pretty().init(),
        Json => builder.json().init(),
    }
}

fn load_logging_config() -> Result<AppConfig> {
    AppConfig::load(LoadOptions::default()).context("loading configuration for logging")
}

fn main() -> ExitCode {
    // Commands report config problems in their own payload; logging stays off.
    match load_logging_config() {
        Ok(config) => init_logging(&config),
        Err(error) => eprintln!("packwise: {error:#}"),
    }

    packwise_cli::run()
}
