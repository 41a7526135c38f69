//! `step` command: compute the successor of one progress snapshot.

use serde::Serialize;

use crate::cli::args::StepArgs;
use crate::cli::commands::source;
use crate::cycler::{Progress, Status, advance, delay_for};
use crate::error::CyclerError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepOutput {
    delay_ms: u128,
    next: Progress,
}

/// Parse `--progress`, then print the delay before the next step and the
/// progress it produces as JSON.
///
/// # Errors
///
/// Returns a JSON error if the snapshot does not parse, or a usage error if
/// its phrase index is outside the phrase list.
pub fn run(args: &StepArgs) -> Result<(), CyclerError> {
    let config = source::load(&args.source)?;
    let progress: Progress = serde_json::from_str(&args.progress)?;

    if progress.status == Status::Unrecognized {
        tracing::warn!("unrecognized status in snapshot, treating it as waitingToType");
    }
    if progress.phrase_idx >= config.phrases.len() {
        return Err(CyclerError::Usage(format!(
            "phraseIdx {} is out of range for {} phrase(s)",
            progress.phrase_idx,
            config.phrases.len()
        )));
    }

    let typewriter = config.typewriter();
    let output = StepOutput {
        delay_ms: delay_for(&typewriter, &progress).as_millis(),
        next: advance(&config.phrases, &typewriter, &progress),
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
