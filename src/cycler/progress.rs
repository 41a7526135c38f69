//! Typewriter configuration and animation progress values.
//!
//! Every type here is an immutable value. A step never mutates a
//! [`Progress`]; it builds the next one, so renderers can diff consecutive
//! values without worrying about aliasing.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Speed / Typewriter
// ============================================================================

/// Pace of one direction of the animation (typing or erasing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speed {
    /// Characters added or removed per step.
    ///
    /// Zero is accepted but makes no forward progress.
    pub num_units: usize,
    /// Delay between steps while actively typing or erasing.
    pub time_ms: u64,
    /// Pause before the first step of this direction.
    pub start_delay_ms: u64,
}

impl Speed {
    /// Creates a new speed.
    #[must_use]
    pub const fn new(num_units: usize, time_ms: u64, start_delay_ms: u64) -> Self {
        Self {
            num_units,
            time_ms,
            start_delay_ms,
        }
    }

    /// Per-step delay as a [`Duration`].
    #[must_use]
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.time_ms)
    }

    /// Start delay as a [`Duration`].
    #[must_use]
    pub const fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

/// Typing and erasing speeds for one animation.
///
/// Shared read-only across every step of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typewriter {
    /// Speed used while revealing characters.
    pub typing_speed: Speed,
    /// Speed used while removing characters.
    pub erasing_speed: Speed,
}

impl Typewriter {
    /// Creates a new typewriter configuration.
    #[must_use]
    pub const fn new(typing_speed: Speed, erasing_speed: Speed) -> Self {
        Self {
            typing_speed,
            erasing_speed,
        }
    }
}

// ============================================================================
// Status
// ============================================================================

/// Where the animation is in its type/erase cycle.
///
/// The four real states cycle in declaration order:
/// `WaitingToType → Typing → WaitingToErase → Erasing → WaitingToType`.
/// The phrase index advances on the final `Erasing → WaitingToType` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Pausing before the current phrase starts to appear.
    #[default]
    WaitingToType,
    /// Revealing the current phrase.
    Typing,
    /// Holding the fully typed phrase before erasing it.
    WaitingToErase,
    /// Removing the current phrase.
    Erasing,
    /// A missing, null, or unknown status.
    ///
    /// Only produced by deserialization. It is treated like
    /// [`Status::WaitingToType`].
    #[serde(other)]
    Unrecognized,
}

impl Status {
    /// Returns `true` while the animation is pausing rather than changing text.
    ///
    /// Renderers typically dim or blink the cursor in these states.
    #[must_use]
    pub const fn is_waiting(self) -> bool {
        matches!(
            self,
            Self::WaitingToType | Self::WaitingToErase | Self::Unrecognized
        )
    }

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaitingToType => "waitingToType",
            Self::Typing => "typing",
            Self::WaitingToErase => "waitingToErase",
            Self::Erasing => "erasing",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Snapshot of the animation at one point in time.
///
/// `phrase` is always a prefix of `phrases[phrase_idx]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Currently displayed prefix of the full phrase.
    pub phrase: String,
    /// Index of the full phrase in the phrase list.
    pub phrase_idx: usize,
    /// Current position in the type/erase cycle.
    #[serde(default = "unset_status", deserialize_with = "status_or_unset")]
    pub status: Status,
}

const fn unset_status() -> Status {
    Status::Unrecognized
}

fn status_or_unset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Status, D::Error> {
    Ok(Option::<Status>::deserialize(deserializer)?.unwrap_or(Status::Unrecognized))
}

/// Starting point of every animation: nothing shown, first phrase, waiting.
pub const DEFAULT_PROGRESS: Progress = Progress {
    phrase: String::new(),
    phrase_idx: 0,
    status: Status::WaitingToType,
};

impl Progress {
    /// Creates a progress value.
    #[must_use]
    pub fn new(phrase: impl Into<String>, phrase_idx: usize, status: Status) -> Self {
        Self {
            phrase: phrase.into(),
            phrase_idx,
            status,
        }
    }

    /// Number of characters currently displayed.
    #[must_use]
    pub fn revealed_len(&self) -> usize {
        self.phrase.chars().count()
    }
}
