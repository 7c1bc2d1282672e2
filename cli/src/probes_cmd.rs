//! `envguard probes`: dump the raw probe bundle.

use std::io::Write;
use std::process::ExitCode;

use crate::cli::ProbesArgs;

pub(crate) fn run(args: &ProbesArgs) -> anyhow::Result<ExitCode> {
    let bundle = crate::collector(&args.input)?.collect();
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &bundle)?;
    writeln!(stdout)?;
    Ok(ExitCode::SUCCESS)
}
