//! Command-line front end for the environment gatekeeper.

pub mod cli;

mod check_cmd;
mod gate_cmd;
mod probes_cmd;

use std::process::ExitCode;

use anyhow::Context;
use envguard_collector::{HostProbeSource, ProbeSource, SignalCollector, SnapshotProbeSource};
use envguard_gatekeeper::config::{ConfigLoader, GuardConfig};
use envguard_scorer::Locale;

pub use cli::{Cli, Command};

/// Exit status for configuration or I/O failures of envguard itself.
pub const INTERNAL_ERROR_EXIT: u8 = 2;

/// Configuration resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: GuardConfig,
    pub locale: Locale,
}

impl Settings {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config = match cli.config.as_ref() {
            Some(path) => ConfigLoader::new().with_file(path).load(),
            None => ConfigLoader::load_default(),
        }
        .context("failed to load configuration")?;
        let locale = cli
            .locale
            .map_or(config.locale, Into::into)
            .resolve();
        Ok(Self { config, locale })
    }
}

pub fn run(command: Command, settings: &Settings) -> anyhow::Result<ExitCode> {
    match command {
        Command::Check(args) => check_cmd::run(&args, settings),
        Command::Probes(args) => probes_cmd::run(&args),
        Command::Gate(args) => gate_cmd::run(&args, settings),
    }
}

type DynProbeSource = Box<dyn ProbeSource + Send + Sync>;

/// The host, or a client-reported snapshot when `--probes` is given.
fn probe_source(input: &cli::ProbeInput) -> anyhow::Result<DynProbeSource> {
    let source: DynProbeSource = match input.probes.as_ref() {
        Some(path) => Box::new(
            SnapshotProbeSource::from_path(path)
                .with_context(|| format!("failed to load probes from {}", path.display()))?,
        ),
        None => Box::new(HostProbeSource::new()),
    };
    Ok(source)
}

fn collector(input: &cli::ProbeInput) -> anyhow::Result<SignalCollector<DynProbeSource>> {
    probe_source(input).map(SignalCollector::new)
}
