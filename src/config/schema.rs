//! Configuration schema types
//!
//! These types are deserialized from YAML configuration files and resolved
//! into the cycler's [`Typewriter`] value.

use serde::{Deserialize, Serialize};

use crate::cycler::{Speed, Typewriter};

/// Typing speed used when the configuration leaves a field out.
pub const DEFAULT_TYPING_SPEED: Speed = Speed::new(1, 80, 600);

/// Erasing speed used when the configuration leaves a field out.
pub const DEFAULT_ERASING_SPEED: Speed = Speed::new(1, 40, 1500);

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration for one phrase animation.
///
/// ```yaml
/// phrases:
///   - "Hello, world"
/// typing_speed:
///   num_units: 1
///   time_ms: 80
/// erasing_speed:
///   start_delay_ms: 1500
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct CyclerConfig {
    /// Phrases to cycle through, in order.
    #[serde(default)]
    pub phrases: Vec<String>,

    /// Typing pace; unset fields fall back to [`DEFAULT_TYPING_SPEED`].
    #[serde(default)]
    pub typing_speed: SpeedConfig,

    /// Erasing pace; unset fields fall back to [`DEFAULT_ERASING_SPEED`].
    #[serde(default)]
    pub erasing_speed: SpeedConfig,
}

impl CyclerConfig {
    /// Resolves both speed blocks against their defaults.
    #[must_use]
    pub const fn typewriter(&self) -> Typewriter {
        Typewriter::new(
            self.typing_speed.resolve(DEFAULT_TYPING_SPEED),
            self.erasing_speed.resolve(DEFAULT_ERASING_SPEED),
        )
    }
}

// ============================================================================
// Speed
// ============================================================================

/// One direction's pace as written in the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SpeedConfig {
    /// Characters per step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_units: Option<usize>,

    /// Milliseconds between steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,

    /// Milliseconds before the first step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_delay_ms: Option<u64>,
}

impl SpeedConfig {
    /// Fills unset fields from `defaults`.
    #[must_use]
    pub const fn resolve(&self, defaults: Speed) -> Speed {
        Speed::new(
            match self.num_units {
                Some(n) => n,
                None => defaults.num_units,
            },
            match self.time_ms {
                Some(ms) => ms,
                None => defaults.time_ms,
            },
            match self.start_delay_ms {
                Some(ms) => ms,
                None => defaults.start_delay_ms,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: CyclerConfig = serde_yaml::from_str("phrases: [\"hello\"]").unwrap();
        assert_eq!(config.phrases, vec!["hello".to_string()]);
        let tw = config.typewriter();
        assert_eq!(tw.typing_speed, DEFAULT_TYPING_SPEED);
        assert_eq!(tw.erasing_speed, DEFAULT_ERASING_SPEED);
    }

    #[test]
    fn test_partial_speed_overrides() {
        let yaml = r"
phrases:
  - one
  - two
typing_speed:
  num_units: 3
erasing_speed:
  time_ms: 5
  start_delay_ms: 0
";
        let config: CyclerConfig = serde_yaml::from_str(yaml).unwrap();
        let tw = config.typewriter();
        assert_eq!(tw.typing_speed, Speed::new(3, 80, 600));
        assert_eq!(tw.erasing_speed, Speed::new(1, 5, 0));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "phrases: [a]\ntyping_speed:\n  units: 2\n";
        assert!(serde_yaml::from_str::<CyclerConfig>(yaml).is_err());
    }

    #[test]
    fn test_missing_phrases_deserializes_empty() {
        let config: CyclerConfig = serde_yaml::from_str("typing_speed: {}").unwrap();
        assert!(config.phrases.is_empty());
    }
}
