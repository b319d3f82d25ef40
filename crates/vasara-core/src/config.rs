//! Toolkit configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::manager::ManagerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for a [`crate::Vasara`] runtime and its shells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolkitConfig {
    pub manager: ManagerConfig,
    /// Insert the toolkit stylesheet during initialization.
    pub inject_styles: bool,
    /// Log level name used by the shells (`error` through `trace`).
    pub log_level: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            manager: ManagerConfig::default(),
            inject_styles: true,
            log_level: "info".to_string(),
        }
    }
}

impl ToolkitConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The configured log level, falling back to `Info` for unknown names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or_else(|_| {
            log::warn!("Unknown log level '{}', using info", self.log_level);
            log::Level::Info
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn test_defaults() {
        let config = ToolkitConfig::default();
        assert!(config.inject_styles);
        assert_eq!(config.log_level(), log::Level::Info);
        assert_eq!(config.manager.front_z_index, 1);
    }

    #[test]
    fn test_from_json() {
        let config = ToolkitConfig::from_json(
            r#"{"injectStyles": false, "logLevel": "debug",
                "manager": {"viewport": {"width": 800, "height": 600}}}"#,
        )
        .unwrap();
        assert!(!config.inject_styles);
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.manager.viewport, Size::new(800.0, 600.0));
        assert_eq!(config.manager.base_z_index, 0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ToolkitConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = ToolkitConfig {
            log_level: "loud".to_string(),
            ..ToolkitConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
