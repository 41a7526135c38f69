//! `phrase-cycler` - typewriter-style phrase animation
//!
//! Types a list of phrases out a few characters at a time, pauses, erases
//! them, and moves on to the next one. The [`cycler`] module holds the
//! timer-free state machine and a cancellable single-shot scheduler; the
//! rest of the crate wraps it in configuration, a continuous driver, a
//! terminal renderer, and a CLI.

pub mod cli;
pub mod config;
pub mod cycler;
pub mod driver;
pub mod error;
pub mod observability;
pub mod render;
