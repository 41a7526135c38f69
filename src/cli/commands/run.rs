//! `run` command: animate the phrases on the terminal.

use tokio_util::sync::CancellationToken;

use crate::cli::args::{ColorChoice, RunArgs};
use crate::cli::commands::source;
use crate::driver::{Animation, RunLimits};
use crate::error::CyclerError;
use crate::render::TerminalRenderer;

/// Animate until cancelled or a `--cycles` / `--for` limit is reached.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the terminal
/// cannot be written.
pub async fn run(
    args: &RunArgs,
    color: ColorChoice,
    cancel: CancellationToken,
) -> Result<(), CyclerError> {
    let config = source::load(&args.source)?;

    let animation = Animation::new(config.phrases.clone(), config.typewriter()).with_limits(
        RunLimits {
            cycles: args.cycles,
            duration: args.duration,
        },
    );

    let stdout = std::io::stdout();
    let ansi = color.enabled_for(&stdout);
    let mut renderer = TerminalRenderer::new(stdout, ansi).with_cursor(args.cursor);
    let summary = animation.run(&mut renderer, cancel).await?;

    tracing::debug!(
        steps = summary.steps,
        cycles = summary.cycles,
        reason = ?summary.stop_reason,
        "run finished"
    );
    Ok(())
}
