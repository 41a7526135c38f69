//! Continuous animation driver.
//!
//! [`schedule_next_step`] arms exactly one step. [`Animation`] keeps the
//! animation alive: every fired step is forwarded over a channel, rendered,
//! and used to schedule the next one, until the run is cancelled or hits a
//! limit. Stopping cancels the outstanding step through its
//! [`CancelHandle`](crate::cycler::CancelHandle).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::cycler::{DEFAULT_PROGRESS, Progress, Status, Typewriter, schedule_next_step};
use crate::error::CyclerError;
use crate::render::Renderer;

/// Optional stopping conditions for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunLimits {
    /// Stop after this many phrases have been typed and fully erased.
    pub cycles: Option<u64>,
    /// Stop after this much wall-clock time.
    pub duration: Option<Duration>,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cancellation token fired.
    Cancelled,
    /// [`RunLimits::cycles`] was reached.
    CycleLimit,
    /// [`RunLimits::duration`] elapsed.
    TimeLimit,
}

/// Outcome of [`Animation::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of steps that fired.
    pub steps: u64,
    /// Number of phrases typed and fully erased.
    pub cycles: u64,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Last rendered progress.
    pub last: Progress,
}

/// A phrase animation bound to its phrases and speeds.
#[derive(Debug, Clone)]
pub struct Animation {
    phrases: Arc<[String]>,
    typewriter: Typewriter,
    limits: RunLimits,
}

impl Animation {
    /// Creates an animation with no limits.
    ///
    /// `phrases` must not be empty; validate it first (the configuration
    /// loader does).
    #[must_use]
    pub fn new(phrases: impl Into<Arc<[String]>>, typewriter: Typewriter) -> Self {
        Self {
            phrases: phrases.into(),
            typewriter,
            limits: RunLimits::default(),
        }
    }

    /// Sets the stopping conditions.
    #[must_use]
    pub fn with_limits(mut self, limits: RunLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Runs the animation from [`DEFAULT_PROGRESS`] until it is cancelled or
    /// a limit is reached.
    ///
    /// The initial progress is rendered before the first step is armed.
    ///
    /// # Errors
    ///
    /// Returns [`CyclerError::Render`] if the renderer fails.
    pub async fn run<R: Renderer>(
        &self,
        renderer: &mut R,
        cancel: CancellationToken,
    ) -> Result<RunSummary, CyclerError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let deadline = self.limits.duration.map(|d| Instant::now() + d);

        let mut progress = DEFAULT_PROGRESS;
        let mut steps = 0u64;
        let mut cycles = 0u64;
        render(renderer, &progress)?;

        tracing::info!(
            phrases = self.phrases.len(),
            cycles = ?self.limits.cycles,
            duration = ?self.limits.duration,
            "animation started"
        );

        let stop_reason = loop {
            if self.limits.cycles.is_some_and(|max| cycles >= max) {
                break StopReason::CycleLimit;
            }

            let step_tx = tx.clone();
            let handle = schedule_next_step(
                Arc::clone(&self.phrases),
                self.typewriter,
                progress.clone(),
                move |next| {
                    let _ = step_tx.send(next);
                },
            );

            let next = tokio::select! {
                () = cancel.cancelled() => {
                    handle.cancel();
                    break StopReason::Cancelled;
                }
                () = until(deadline) => {
                    handle.cancel();
                    break StopReason::TimeLimit;
                }
                next = rx.recv() => next,
            };
            // `tx` lives for the whole loop, so the channel cannot close.
            let Some(next) = next else {
                break StopReason::Cancelled;
            };

            steps += 1;
            if progress.status == Status::Erasing && next.status == Status::WaitingToType {
                cycles += 1;
                tracing::debug!(
                    finished = progress.phrase_idx,
                    next = next.phrase_idx,
                    cycles,
                    "phrase cycle complete"
                );
            }

            render(renderer, &next)?;
            progress = next;
        };

        renderer
            .finish()
            .map_err(|e| CyclerError::Render(e.to_string()))?;

        tracing::info!(steps, cycles, reason = ?stop_reason, "animation stopped");

        Ok(RunSummary {
            steps,
            cycles,
            stop_reason,
            last: progress,
        })
    }
}

fn render<R: Renderer>(renderer: &mut R, progress: &Progress) -> Result<(), CyclerError> {
    renderer
        .render(progress)
        .map_err(|e| CyclerError::Render(e.to_string()))
}

async fn until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
