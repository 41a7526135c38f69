//! Observability module
//!
//! Structured logging for the cycler, the driver and the CLI.

pub mod logging;

pub use logging::{LogFormat, init_logging};
