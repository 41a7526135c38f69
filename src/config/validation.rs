//! Configuration validation
//!
//! Runs on the fully deserialized [`CyclerConfig`] and collects every issue
//! rather than stopping at the first. An empty phrase list is the one
//! hard error the cycler cannot survive, so it must be caught here before
//! any step is scheduled.

use crate::config::loader::ConfigLimits;
use crate::config::schema::CyclerConfig;
use crate::cycler::Speed;
use crate::error::{Severity, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    pub fn validate(&mut self, config: &CyclerConfig, limits: &ConfigLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_phrases(config, limits);

        let typewriter = config.typewriter();
        self.validate_speed("typing_speed", typewriter.typing_speed);
        self.validate_speed("erasing_speed", typewriter.erasing_speed);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_phrases(&mut self, config: &CyclerConfig, limits: &ConfigLimits) {
        if config.phrases.is_empty() {
            self.add_error("phrases", "at least one phrase is required");
            return;
        }

        if config.phrases.len() > limits.max_phrases {
            self.add_error(
                "phrases",
                &format!(
                    "{} phrases exceeds the limit of {}",
                    config.phrases.len(),
                    limits.max_phrases
                ),
            );
        }

        for (i, phrase) in config.phrases.iter().enumerate() {
            let path = format!("phrases[{i}]");
            if phrase.is_empty() {
                self.add_warning(&path, "phrase is empty and will only show a pause");
            } else if phrase.chars().any(char::is_control) {
                self.add_warning(
                    &path,
                    "phrase contains control characters that break single-line rendering",
                );
            }
        }
    }

    fn validate_speed(&mut self, field: &str, speed: Speed) {
        if speed.num_units == 0 {
            self.add_warning(
                &format!("{field}.num_units"),
                "num_units is 0, the animation will stall in this direction",
            );
        }
    }

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SpeedConfig;

    fn config(phrases: &[&str]) -> CyclerConfig {
        CyclerConfig {
            phrases: phrases.iter().map(ToString::to_string).collect(),
            ..CyclerConfig::default()
        }
    }

    fn limits() -> ConfigLimits {
        ConfigLimits {
            max_phrases: 3,
            max_config_size: 1024,
        }
    }

    #[test]
    fn test_valid_config() {
        let result = Validator::new().validate(&config(&["hello", "world"]), &limits());
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_phrases_is_error() {
        let result = Validator::new().validate(&config(&[]), &limits());
        assert!(result.has_errors());
        assert_eq!(result.errors[0].path, "phrases");
    }

    #[test]
    fn test_too_many_phrases_is_error() {
        let result = Validator::new().validate(&config(&["a", "b", "c", "d"]), &limits());
        assert!(result.has_errors());
        assert!(result.errors[0].message.contains("exceeds"));
    }

    #[test]
    fn test_empty_phrase_warns() {
        let result = Validator::new().validate(&config(&["a", ""]), &limits());
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "phrases[1]");
    }

    #[test]
    fn test_control_characters_warn() {
        let result = Validator::new().validate(&config(&["line\nbreak"]), &limits());
        assert!(result.is_valid());
        assert_eq!(result.warnings[0].path, "phrases[0]");
    }

    #[test]
    fn test_zero_units_warns() {
        let mut cfg = config(&["a"]);
        cfg.erasing_speed = SpeedConfig {
            num_units: Some(0),
            ..SpeedConfig::default()
        };
        let result = Validator::new().validate(&cfg, &limits());
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "erasing_speed.num_units");
    }

    #[test]
    fn test_validator_is_reusable() {
        let mut validator = Validator::new();
        assert!(validator.validate(&config(&[]), &limits()).has_errors());
        assert!(validator.validate(&config(&["ok"]), &limits()).is_valid());
    }
}
