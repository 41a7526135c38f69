//! `validate` command: check configuration files without running them.

use std::path::Path;

use crate::cli::args::ValidateArgs;
use crate::config::{ConfigLoader, LoadResult};
use crate::error::{ConfigError, CyclerError, Severity, ValidationIssue};

/// Validate every file, printing one line per file and logging warnings.
///
/// A failing file is reported on stderr and checking moves on to the next.
///
/// # Errors
///
/// Returns [`ConfigError::FilesFailed`] if any file failed to load, failed
/// validation, or had warnings under `--strict`.
pub fn run(args: &ValidateArgs) -> Result<(), CyclerError> {
    let loader = ConfigLoader::with_defaults();
    let mut failed = 0;

    for path in &args.files {
        match check(&loader, path, args.strict) {
            Ok(result) => println!(
                "{}: ok ({} phrase(s), {} warning(s))",
                path.display(),
                result.config.phrases.len(),
                result.warnings.len()
            ),
            Err(e) => {
                eprintln!("error: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(ConfigError::FilesFailed {
            failed,
            total: args.files.len(),
        }
        .into());
    }
    Ok(())
}

fn check(loader: &ConfigLoader, path: &Path, strict: bool) -> Result<LoadResult, ConfigError> {
    tracing::info!(file = %path.display(), "validating configuration");
    let result = loader.load(path)?;

    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    if strict && !result.warnings.is_empty() {
        return Err(ConfigError::ValidationError {
            path: path.display().to_string(),
            errors: result
                .warnings
                .into_iter()
                .map(|w| ValidationIssue {
                    path: w.location.unwrap_or_default(),
                    message: w.message,
                    severity: Severity::Warning,
                })
                .collect(),
        });
    }

    Ok(result)
}
