use std::process::ExitCode;

use clap::Parser;
use envguard_cli::{Cli, INTERNAL_ERROR_EXIT, Settings, run};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            init_logging("warn");
            eprintln!("envguard: {err:#}");
            return ExitCode::from(INTERNAL_ERROR_EXIT);
        }
    };
    init_logging(&settings.config.logging.filter);
    tracing::debug!(locale = ?settings.locale, "configuration loaded");

    match run(cli.command, &settings) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "envguard failed");
            eprintln!("envguard: {err:#}");
            ExitCode::from(INTERNAL_ERROR_EXIT)
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_filter))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
