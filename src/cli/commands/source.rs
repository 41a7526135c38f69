//! Resolves `--config` / `--phrase` into a validated configuration.

use std::sync::Arc;

use crate::cli::args::SourceArgs;
use crate::config::loader::{ConfigLoader, LoadResult};
use crate::config::schema::CyclerConfig;
use crate::error::CyclerError;

/// Loads the configuration named by `source`.
///
/// `--phrase` values replace the file's phrase list; with no file they form
/// the whole configuration with default speeds. Load warnings are logged.
///
/// # Errors
///
/// Returns a usage error if neither a file nor a phrase is given, or a
/// config error if loading or validation fails.
pub fn load(source: &SourceArgs) -> Result<Arc<CyclerConfig>, CyclerError> {
    let loader = ConfigLoader::with_defaults();

    let result = match (&source.config, source.phrases.is_empty()) {
        (Some(path), true) => {
            tracing::info!(config = %path.display(), "loading configuration");
            loader.load(path)?
        }
        (Some(path), false) => {
            tracing::info!(
                config = %path.display(),
                phrases = source.phrases.len(),
                "loading configuration with phrase override"
            );
            loader.load_with(path, |config| config.phrases.clone_from(&source.phrases))?
        }
        (None, false) => loader.load_value(
            CyclerConfig {
                phrases: source.phrases.clone(),
                ..CyclerConfig::default()
            },
            "<command line>",
        )?,
        (None, true) => {
            return Err(CyclerError::Usage(
                "either --config or at least one --phrase is required".to_string(),
            ));
        }
    };

    log_warnings(&result);
    Ok(result.config)
}

fn log_warnings(result: &LoadResult) {
    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
}
