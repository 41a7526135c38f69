//! Phrase cycler
//!
//! Cycles through a list of phrases by typing them out a few characters
//! at a time, pausing, erasing them, and moving on to the next phrase.
//!
//! # Architecture
//!
//! - [`progress`]: value types ([`Typewriter`], [`Progress`], [`Status`])
//! - [`step`]: pure [`delay_for`] / [`advance`] functions and the [`Steps`] iterator
//! - [`schedule`]: [`schedule_next_step`], a cancellable single-shot timer
//!
//! The scheduler never loops on its own. Callers continue the animation by
//! scheduling the next step from the `on_next` callback; see
//! [`crate::driver::Animation`] for a ready-made loop.

pub mod progress;
pub mod schedule;
pub mod step;

pub use progress::{DEFAULT_PROGRESS, Progress, Speed, Status, Typewriter};
pub use schedule::{CancelHandle, StepState, schedule_next_step};
pub use step::{Step, Steps, advance, delay_for, steps};
