//! Configuration module
//!
//! Loads and validates phrase-cycler configuration files: the phrase list
//! and the typing/erasing speeds.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use schema::*;
pub use validation::{ValidationResult, Validator};
