//! Configuration loader
//!
//! Loading pipeline:
//! 1. Size check against [`ConfigLimits`]
//! 2. Environment variable expansion (on raw text, before parsing)
//! 3. YAML parsing into [`CyclerConfig`]
//! 4. Validation
//! 5. Freeze with `Arc`

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;
use std::sync::Arc;

use crate::config::schema::CyclerConfig;
use crate::config::validation::Validator;
use crate::error::ConfigError;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits for configuration size.
    pub config_limits: ConfigLimits,
}

/// Limits for configuration size.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum number of phrases.
    pub max_phrases: usize,

    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_phrases: env_or("PHRASE_CYCLER_MAX_PHRASES", 10_000),
            max_config_size: env_or("PHRASE_CYCLER_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Result of loading a configuration.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<CyclerConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads, validates, and freezes a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or too large, a required
    /// environment variable is unset, the YAML does not parse, or
    /// validation reports errors.
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let (config, warnings) = self.parse(path)?;
        self.freeze(config, &path.display().to_string(), warnings)
    }

    /// Loads a configuration file, applies `edit`, then validates and
    /// freezes the result.
    ///
    /// Lets command-line overrides fill in fields the file leaves empty
    /// before validation sees them.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load`].
    pub fn load_with<F>(&self, path: &Path, edit: F) -> Result<LoadResult, ConfigError>
    where
        F: FnOnce(&mut CyclerConfig),
    {
        let (mut config, warnings) = self.parse(path)?;
        edit(&mut config);
        self.freeze(config, &path.display().to_string(), warnings)
    }

    /// Reads, expands, and parses a file without validating it.
    fn parse(&self, path: &Path) -> Result<(CyclerConfig, Vec<LoadWarning>), ConfigError> {
        let limit = self.options.config_limits.max_config_size;
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if usize::try_from(metadata.len()).map_or(true, |size| size > limit) {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit,
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

        let mut env_sub = EnvSubstitution::new(path);
        let substituted = env_sub.substitute(raw)?;

        if substituted.trim().is_empty() {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "configuration file is empty".to_string(),
            });
        }

        let config: CyclerConfig =
            serde_yaml::from_str(&substituted).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        tracing::debug!(
            file = %path.display(),
            phrases = config.phrases.len(),
            "configuration parsed"
        );

        Ok((config, env_sub.warnings))
    }

    /// Validates and freezes an in-memory configuration.
    ///
    /// Used for configurations assembled from command-line flags.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if validation reports errors.
    pub fn load_value(&self, config: CyclerConfig, source: &str) -> Result<LoadResult, ConfigError> {
        self.freeze(config, source, Vec::new())
    }

    fn freeze(
        &self,
        config: CyclerConfig,
        source: &str,
        mut warnings: Vec<LoadWarning>,
    ) -> Result<LoadResult, ConfigError> {
        let result = Validator::new().validate(&config, &self.options.config_limits);
        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: source.to_string(),
                errors: result.errors,
            });
        }

        warnings.extend(result.warnings.into_iter().map(|issue| LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }));

        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

// ============================================================================
// Environment Substitution
// ============================================================================

/// Pre-parse environment variable substitution.
///
/// Supports `${VAR}` (empty with a warning when unset), `${VAR:-default}`,
/// `${VAR:?message}` (error when unset) and `$$` for a literal `$`.
struct EnvSubstitution<'a> {
    source: &'a Path,
    line: usize,
    warnings: Vec<LoadWarning>,
}

impl<'a> EnvSubstitution<'a> {
    const fn new(source: &'a Path) -> Self {
        Self {
            source,
            line: 1,
            warnings: Vec::new(),
        }
    }

    fn location(&self) -> String {
        format!("{}:{}", self.source.display(), self.line)
    }

    fn substitute(&mut self, raw: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\n' => {
                    self.line += 1;
                    out.push(c);
                }
                '$' if chars.peek() == Some(&'$') => {
                    chars.next();
                    out.push('$');
                }
                '$' if chars.peek() == Some(&'{') => {
                    chars.next();
                    let expr = self.read_reference(&mut chars)?;
                    self.expand(&expr, &mut out)?;
                }
                _ => out.push(c),
            }
        }

        Ok(out)
    }

    /// Reads up to the closing `}` of a `${...}` reference.
    fn read_reference(&self, chars: &mut Peekable<Chars<'_>>) -> Result<String, ConfigError> {
        let mut expr = String::new();
        for c in chars.by_ref() {
            match c {
                '}' => return Ok(expr),
                '\n' => break,
                _ => expr.push(c),
            }
        }
        Err(ConfigError::ParseError {
            path: self.source.to_path_buf(),
            line: Some(self.line),
            message: format!("unterminated variable reference '${{{expr}'"),
        })
    }

    fn expand(&mut self, expr: &str, out: &mut String) -> Result<(), ConfigError> {
        let (name, fallback) = match expr.split_once(":-") {
            Some((name, default)) => (name, Some(Ok(default))),
            None => match expr.split_once(":?") {
                Some((name, message)) => (name, Some(Err(message))),
                None => (expr, None),
            },
        };

        if let Ok(value) = std::env::var(name) {
            out.push_str(&value);
            return Ok(());
        }

        match fallback {
            Some(Ok(default)) => out.push_str(default),
            Some(Err(message)) => {
                let location = if message.is_empty() {
                    self.location()
                } else {
                    format!("{}: {message}", self.location())
                };
                return Err(ConfigError::EnvVarNotSet {
                    var: name.to_string(),
                    location,
                });
            }
            None => self.warnings.push(LoadWarning {
                message: format!("environment variable '{name}' is not set, using empty string"),
                location: Some(self.location()),
            }),
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
