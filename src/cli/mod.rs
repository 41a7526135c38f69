//! Command-line interface
//!
//! Argument definitions and command handlers for the `phrase-cycler` binary.

pub mod args;
pub mod commands;
