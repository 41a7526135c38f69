//! `trace` command: print upcoming steps without waiting for them.

use std::io::Write;

use serde::Serialize;

use crate::cli::args::{OutputFormat, TraceArgs};
use crate::cli::commands::source;
use crate::cycler::{DEFAULT_PROGRESS, Progress, steps};
use crate::error::CyclerError;

/// One line of JSON trace output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceLine<'a> {
    step: usize,
    delay_ms: u128,
    progress: &'a Progress,
}

/// Print the first `--steps` steps from the default progress.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or stdout
/// cannot be written.
pub fn run(args: &TraceArgs) -> Result<(), CyclerError> {
    let config = source::load(&args.source)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let schedule = steps(&config.phrases, config.typewriter(), DEFAULT_PROGRESS);
    for (i, step) in schedule.take(args.steps).enumerate() {
        match args.format {
            OutputFormat::Human => writeln!(
                out,
                "{:>4}  +{:>5}ms  {:<15} [{}] {:?}",
                i + 1,
                step.delay.as_millis(),
                step.progress.status.as_str(),
                step.progress.phrase_idx,
                step.progress.phrase
            )?,
            OutputFormat::Json => {
                let line = TraceLine {
                    step: i + 1,
                    delay_ms: step.delay.as_millis(),
                    progress: &step.progress,
                };
                serde_json::to_writer(&mut out, &line)?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}
