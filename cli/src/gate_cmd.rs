//! `envguard gate -- PROGRAM`: start PROGRAM only in an admitted environment.

use std::io::IsTerminal;
use std::process::{Command, ExitCode, ExitStatus};

use anyhow::Context;
use envguard_gatekeeper::{
    Admission, BlockSurface, Gatekeeper, StderrBlockSurface, TerminalBlockSurface,
};

use crate::Settings;
use crate::cli::GateArgs;

pub(crate) fn run(args: &GateArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let (program, program_args) = args
        .program()
        .context("gate needs a program to run after `--`")?;

    let source = crate::probe_source(&args.input)?;
    let surface: Box<dyn BlockSurface> = if std::io::stdout().is_terminal() {
        Box::new(TerminalBlockSurface::from_config(
            settings.locale,
            &settings.config.block,
        ))
    } else {
        Box::new(StderrBlockSurface::new(settings.locale))
    };
    let gatekeeper = Gatekeeper::new(source, surface, settings.locale);

    match gatekeeper.admit() {
        Admission::Blocked => {
            let code = u8::try_from(settings.config.block.exit_code)
                .context("block.exit_code out of range")?;
            Ok(ExitCode::from(code))
        }
        Admission::Proceed => {
            tracing::debug!(program = %program.to_string_lossy(), "starting program");
            let status = Command::new(program)
                .args(program_args)
                .status()
                .with_context(|| format!("failed to start {}", program.to_string_lossy()))?;
            Ok(ExitCode::from(exit_code_of(status)))
        }
    }
}

/// Mirror the child's status, using the shell convention for signals.
fn exit_code_of(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return u8::try_from(code).unwrap_or(1);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return u8::try_from(128 + signal).unwrap_or(1);
        }
    }
    1
}
