//! Environment-driven core configuration.
//!
//! # Responsibility
//! - Resolve log level, log directory and default category for callers.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Set but invalid values are rejected, never silently replaced.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use crate::model::event::{Category, CategoryParseError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Log level override, `trace|debug|info|warn|error`.
pub const ENV_LOG_LEVEL: &str = "DAYPLANNER_LOG_LEVEL";
/// Absolute directory for rolling log files; logging is off when unset.
pub const ENV_LOG_DIR: &str = "DAYPLANNER_LOG_DIR";
/// Category preselected in the editor, `work|personal|others`.
pub const ENV_DEFAULT_CATEGORY: &str = "DAYPLANNER_DEFAULT_CATEGORY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
    pub default_category: Category,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            default_category: Category::default(),
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(|message| ConfigError::Invalid {
                key: ENV_LOG_LEVEL,
                message,
            })?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(normalize_log_dir(&dir).map_err(|message| {
                ConfigError::Invalid {
                    key: ENV_LOG_DIR,
                    message,
                }
            })?);
        }
        if let Some(category) = read(ENV_DEFAULT_CATEGORY) {
            config.default_category =
                category
                    .parse()
                    .map_err(|err: CategoryParseError| ConfigError::Invalid {
                        key: ENV_DEFAULT_CATEGORY,
                        message: err.to_string(),
                    })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_DEFAULT_CATEGORY, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::model::event::Category;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.default_category, Category::Work);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn values_are_normalized() {
        let dir = std::env::temp_dir();
        let dir_str = dir.to_str().unwrap();
        let config = CoreConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, " WARNING "),
            (ENV_LOG_DIR, dir_str),
            (ENV_DEFAULT_CATEGORY, "Personal"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some(dir.as_path()));
        assert_eq!(config.default_category, Category::Personal);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "   ")])).unwrap();
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "verbose")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_LOG_LEVEL));

        let err = CoreConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "logs/dev")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_LOG_DIR));

        let err =
            CoreConfig::from_lookup(lookup(&[(ENV_DEFAULT_CATEGORY, "hobby")])).unwrap_err();
        assert!(err.to_string().contains("hobby"));
    }
}
