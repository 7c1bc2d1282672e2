//! `envguard check`: operator diagnostics for the current environment.

use std::io::Write;
use std::process::ExitCode;

use envguard_scorer::{MAX_SCORE, Verdict};

use crate::Settings;
use crate::cli::CheckArgs;

pub(crate) fn run(args: &CheckArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let verdict = crate::collector(&args.input)?.classify(settings.locale);
    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &verdict)?;
        writeln!(stdout)?;
    } else {
        write_report(&mut stdout, &verdict)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn write_report(out: &mut impl Write, verdict: &Verdict) -> std::io::Result<()> {
    let label = if verdict.is_emulator {
        "emulated"
    } else {
        "physical"
    };
    writeln!(out, "score:   {}/{MAX_SCORE}", verdict.score)?;
    writeln!(out, "verdict: {label}")?;
    writeln!(out, "groups:")?;
    for group in &verdict.groups {
        writeln!(
            out,
            "  {:<10} {:>2}/{:<2} (raw {})",
            group.group.as_ref(),
            group.points,
            group.group.cap(),
            group.raw_points
        )?;
    }
    writeln!(out, "reasons:")?;
    for reason in &verdict.reasons {
        writeln!(out, "  - {reason}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use envguard_scorer::{Locale, ProbeBundle, classify_with_locale};
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_report_lists_every_group() {
        let verdict = classify_with_locale(&ProbeBundle::default(), Locale::En);
        let mut out = Vec::new();
        write_report(&mut out, &verdict).expect("write to vec");
        let report = String::from_utf8(out).expect("utf-8");
        assert_eq!(
            report,
            "score:   0/100\n\
             verdict: physical\n\
             groups:\n  \
             user_agent  0/25 (raw 0)\n  \
             platform    0/15 (raw 0)\n  \
             screen      0/20 (raw 0)\n  \
             hardware    0/15 (raw 0)\n  \
             touch       0/10 (raw 0)\n  \
             gpu         0/15 (raw 0)\n\
             reasons:\n  \
             - No emulator indicators found\n"
        );
    }
}
