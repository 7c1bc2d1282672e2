use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use envguard_gatekeeper::config::LocaleSetting;

/// Detect emulated or virtualized runtimes before an application starts.
#[derive(Debug, Parser)]
#[command(name = "envguard", version)]
pub struct Cli {
    /// Configuration file (defaults to ./envguard.toml, then the user config dir).
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Language for reasons and the blocking message.
    #[arg(long = "locale", global = true, value_enum)]
    pub locale: Option<LocaleArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the score, verdict and reasons for this environment.
    Check(CheckArgs),
    /// Print the collected probe bundle as JSON.
    Probes(ProbesArgs),
    /// Run PROGRAM only if this environment is not blocked.
    Gate(GateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    Ru,
    En,
}

impl From<LocaleArg> for LocaleSetting {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::Ru => LocaleSetting::Ru,
            LocaleArg::En => LocaleSetting::En,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ProbeInput {
    /// Client-reported probe snapshot (JSON) instead of probing this host.
    #[arg(long = "probes", value_name = "FILE")]
    pub probes: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: ProbeInput,

    /// Output as JSON.
    #[arg(long = "json", short = 'j')]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct ProbesArgs {
    #[command(flatten)]
    pub input: ProbeInput,
}

#[derive(Debug, Parser)]
pub struct GateArgs {
    #[command(flatten)]
    pub input: ProbeInput,

    /// Program to start when admitted, followed by its arguments.
    #[arg(value_name = "PROGRAM", required = true, last = true, num_args = 1..)]
    pub command: Vec<OsString>,
}

impl GateArgs {
    /// Split the trailing command into program and arguments.
    pub fn program(&self) -> Option<(&OsString, &[OsString])> {
        self.command.split_first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["envguard", "check", "--json", "--locale", "en"])
            .expect("parse");
        assert_eq!(cli.locale, Some(LocaleArg::En));
        assert!(matches!(cli.command, Command::Check(CheckArgs { json: true, .. })));
    }

    #[test]
    fn gate_takes_program_after_double_dash() {
        let cli = Cli::try_parse_from([
            "envguard", "gate", "--probes", "p.json", "--", "echo", "--flag", "hi",
        ])
        .expect("parse");
        let Command::Gate(args) = cli.command else {
            panic!("expected gate");
        };
        assert_eq!(args.input.probes, Some(PathBuf::from("p.json")));
        let (program, rest) = args.program().expect("program present");
        assert_eq!(program, &OsString::from("echo"));
        assert_eq!(rest, [OsString::from("--flag"), OsString::from("hi")]);
    }

    #[test]
    fn gate_requires_a_program() {
        assert!(Cli::try_parse_from(["envguard", "gate"]).is_err());
    }
}
