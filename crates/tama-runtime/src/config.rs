//! Configuration loading and typed config structures for a Tama session.
//!
//! The canonical configuration lives in `tama-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//! Every section is optional; missing values fall back to the defaults
//! the pet was tuned with.

use std::path::Path;

use serde::Deserialize;
use tama_core::{PolicyConfig, PolicyError};

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "TAMA_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The file parsed but its values are inconsistent.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Description of the first problem found.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl From<PolicyError> for ConfigError {
    fn from(source: PolicyError) -> Self {
        Self::Invalid {
            reason: source.to_string(),
        }
    }
}

/// Top-level session configuration.
///
/// Mirrors the structure of `tama-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TamaConfig {
    /// Rules the reducer applies.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Timer cadence for health checks and ageing.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Low-stat push alert throttling.
    #[serde(default)]
    pub alerts: AlertConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TamaConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `TAMA_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values are inconsistent.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values are inconsistent.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config
            .logging
            .apply_level_override(std::env::var(LOG_LEVEL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Check every section for inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;

        if self.scheduler.health_check_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "scheduler.health_check_interval_ms must be at least 1ms".to_owned(),
            });
        }
        if self.scheduler.age_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "scheduler.age_interval_ms must be at least 1ms".to_owned(),
            });
        }
        if self.alerts.low_threshold > self.alerts.reset_threshold {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "alerts.low_threshold ({}) exceeds alerts.reset_threshold ({})",
                    self.alerts.low_threshold, self.alerts.reset_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Timer cadence owned by the scheduler. Decay cadence lives in the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SchedulerConfig {
    /// Milliseconds between two health checks.
    #[serde(default = "default_health_check_interval_ms")]
    pub health_check_interval_ms: u64,

    /// Milliseconds of session time per year of pet age.
    #[serde(default = "default_age_interval_ms")]
    pub age_interval_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            health_check_interval_ms: default_health_check_interval_ms(),
            age_interval_ms: default_age_interval_ms(),
        }
    }
}

/// Throttling of low-stat push alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AlertConfig {
    /// A stat strictly below this raises an alert.
    #[serde(default = "default_low_threshold")]
    pub low_threshold: u32,

    /// A stat at or above this re-arms its alert.
    #[serde(default = "default_reset_threshold")]
    pub reset_threshold: u32,

    /// Minimum milliseconds between two alerts for the same stat.
    #[serde(default = "default_alert_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            low_threshold: default_low_threshold(),
            reset_threshold: default_reset_threshold(),
            cooldown_ms: default_alert_cooldown_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl LoggingConfig {
    /// Replace the level with `value` when one is given and non-empty.
    pub fn apply_level_override(&mut self, value: Option<String>) {
        if let Some(level) = value.filter(|level| !level.trim().is_empty()) {
            self.level = level;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_health_check_interval_ms() -> u64 {
    5_000
}

const fn default_age_interval_ms() -> u64 {
    120_000
}

const fn default_low_threshold() -> u32 {
    10
}

const fn default_reset_threshold() -> u32 {
    20
}

const fn default_alert_cooldown_ms() -> u64 {
    // Two hours.
    7_200_000
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TamaConfig::default();
        assert_eq!(config.scheduler.health_check_interval_ms, 5_000);
        assert_eq!(config.scheduler.age_interval_ms, 120_000);
        assert_eq!(config.alerts.cooldown_ms, 7_200_000);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
policy:
  limits:
    min: 0
    max: 100
    initial: 60
  critical:
    hunger: 12
    sick_threshold: 4
  decay:
    hunger:
      interval_ms: 60000
      amount: 8
  cooldowns:
    feed: 20000
  abuse:
    threshold: 5
    window_ms: 8000
    block_duration_ms: 30000

scheduler:
  health_check_interval_ms: 2500
  age_interval_ms: 60000

alerts:
  low_threshold: 15
  reset_threshold: 25
  cooldown_ms: 600000

logging:
  level: "debug"
"#;

        let config = TamaConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.policy.limits.initial, 60);
        assert_eq!(config.policy.critical.hunger, 12);
        assert_eq!(config.policy.critical.energy, 10);
        assert_eq!(config.policy.decay.hunger.amount, 8);
        assert_eq!(config.policy.cooldowns.feed, 20_000);
        assert_eq!(config.policy.cooldowns.rest, 90_000);
        assert_eq!(config.policy.abuse.block_duration_ms, 30_000);
        assert_eq!(config.scheduler.health_check_interval_ms, 2_500);
        assert_eq!(config.alerts.low_threshold, 15);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "scheduler:\n  health_check_interval_ms: 1000\n";
        let config = TamaConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.scheduler.health_check_interval_ms, 1_000);
        assert_eq!(config.scheduler.age_interval_ms, 120_000);
        assert_eq!(config.policy, PolicyConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        let config = TamaConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn rejects_invalid_policy() {
        let yaml = "policy:\n  abuse:\n    threshold: 0\n";
        assert!(matches!(
            TamaConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_zero_health_interval() {
        let yaml = "scheduler:\n  health_check_interval_ms: 0\n";
        assert!(matches!(
            TamaConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            TamaConfig::parse("policy: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn level_override() {
        let mut logging = LoggingConfig::default();
        logging.apply_level_override(None);
        assert_eq!(logging.level, "info");
        logging.apply_level_override(Some("  ".to_owned()));
        assert_eq!(logging.level, "info");
        logging.apply_level_override(Some("trace".to_owned()));
        assert_eq!(logging.level, "trace");
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("tama-config.yaml");
        if path.exists() {
            let config = TamaConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
