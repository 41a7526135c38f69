//! Single-shot, cancellable step scheduling on the tokio runtime.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio_util::sync::CancellationToken;

use super::progress::{Progress, Typewriter};
use super::step::{advance, delay_for};

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

// ============================================================================
// CancelHandle
// ============================================================================

/// Outcome of a scheduled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// The timer has not fired and the step was not cancelled.
    Pending,
    /// The callback was invoked.
    Fired,
    /// The step was cancelled before it fired.
    Cancelled,
}

#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    wake: CancellationToken,
}

impl Shared {
    /// Claims the step for the timer. Exactly one of this and
    /// [`CancelHandle::cancel`] can succeed.
    fn try_fire(&self) -> bool {
        self.state
            .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Handle returned by [`schedule_next_step`].
///
/// Cancelling before the timer fires guarantees the callback never runs.
/// Cancelling after it fired, or more than once, does nothing. Dropping
/// the handle does not cancel the step.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
}

impl CancelHandle {
    fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: AtomicU8::new(PENDING),
                wake: CancellationToken::new(),
            }),
        }
    }

    /// Cancels the pending step.
    ///
    /// Returns `true` if this call is the one that suppressed the callback.
    pub fn cancel(&self) -> bool {
        let won = self
            .shared
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.shared.wake.cancel();
            tracing::debug!("scheduled step cancelled");
        }
        won
    }

    /// Current state of the step.
    #[must_use]
    pub fn state(&self) -> StepState {
        match self.shared.state.load(Ordering::Acquire) {
            FIRED => StepState::Fired,
            CANCELLED => StepState::Cancelled,
            _ => StepState::Pending,
        }
    }

    /// Returns `true` if the step was cancelled before firing.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state() == StepState::Cancelled
    }

    /// Returns `true` if the callback has been invoked (or is running).
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.state() == StepState::Fired
    }
}

// ============================================================================
// Scheduling
// ============================================================================

/// Arms a one-shot timer that advances `progress` and hands the result to
/// `on_next`.
///
/// The delay comes from [`delay_for`]. When it elapses the next progress is
/// computed with [`advance`] and passed to `on_next` exactly once, unless
/// the returned handle was cancelled first. The caller keeps the animation
/// going by scheduling again from inside `on_next`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime. The spawned task panics (and
/// `on_next` is never invoked) under the conditions listed on [`advance`].
pub fn schedule_next_step<F>(
    phrases: Arc<[String]>,
    typewriter: Typewriter,
    progress: Progress,
    on_next: F,
) -> CancelHandle
where
    F: FnOnce(Progress) + Send + 'static,
{
    let delay = delay_for(&typewriter, &progress);
    let handle = CancelHandle::new();
    let shared = Arc::clone(&handle.shared);

    tracing::trace!(
        status = %progress.status,
        phrase_idx = progress.phrase_idx,
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "step armed"
    );

    tokio::spawn(async move {
        tokio::select! {
            () = shared.wake.cancelled() => {}
            () = tokio::time::sleep(delay) => {
                if shared.try_fire() {
                    let next = advance(&phrases, &typewriter, &progress);
                    tracing::trace!(status = %next.status, phrase_idx = next.phrase_idx, "step fired");
                    on_next(next);
                }
            }
        }
    });

    handle
}
