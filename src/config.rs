//! pushlink configuration file handling
//!
//! Configuration is TOML. Every section and key is optional; missing values
//! fall back to the defaults below (staging environment, 20 notifications,
//! 50 chat messages, `info` logging).

use crate::push::facade::{DEFAULT_CHAT_HISTORY_LIMIT, DEFAULT_NOTIFICATION_LIMIT};
use crate::push::traits::{Env, PushError, PushResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushConfig {
    /// Messaging SDK settings
    #[serde(default)]
    pub push: PushSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Messaging SDK settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushSettings {
    /// Environment passed at session creation
    #[serde(default)]
    pub env: Env,

    /// Limit used by `get_notifications_default`
    #[serde(default = "default_notification_limit")]
    pub notification_limit: u32,

    /// Limit used by `get_chat_history_default`
    #[serde(default = "default_chat_history_limit")]
    pub chat_history_limit: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directives (e.g. "info", "pushlink=debug").
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_notification_limit() -> u32 {
    DEFAULT_NOTIFICATION_LIMIT
}

fn default_chat_history_limit() -> u32 {
    DEFAULT_CHAT_HISTORY_LIMIT
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for PushSettings {
    fn default() -> Self {
        Self {
            env: Env::default(),
            notification_limit: DEFAULT_NOTIFICATION_LIMIT,
            chat_history_limit: DEFAULT_CHAT_HISTORY_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl PushConfig {
    /// Default config location: `<config dir>/pushlink/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pushlink").join("config.toml"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> PushResult<Self> {
        let config: PushConfig = toml::from_str(contents)
            .map_err(|e| PushError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PushResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PushError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&contents).map_err(|e| match e {
            PushError::Config(msg) => {
                PushError::Config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> PushResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| PushError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PushError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(path, contents).map_err(|e| {
            PushError::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Reject limits the SDK cannot serve
    pub fn validate(&self) -> PushResult<()> {
        if self.push.notification_limit == 0 {
            return Err(PushError::Config(
                "push.notification_limit must be at least 1".to_string(),
            ));
        }
        if self.push.chat_history_limit == 0 {
            return Err(PushError::Config(
                "push.chat_history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PushConfig::default();
        assert_eq!(config.push.env, Env::Staging);
        assert_eq!(config.push.notification_limit, 20);
        assert_eq!(config.push.chat_history_limit, 50);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = PushConfig::from_toml("").unwrap();
        assert_eq!(config, PushConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = PushConfig::from_toml(
            r#"
[push]
env = "prod"
chat_history_limit = 10

[logging]
json = true
"#,
        )
        .unwrap();

        assert_eq!(config.push.env, Env::Prod);
        assert_eq!(config.push.notification_limit, 20);
        assert_eq!(config.push.chat_history_limit, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.json);
    }

    #[test]
    fn test_unknown_env_rejected() {
        let result = PushConfig::from_toml("[push]\nenv = \"mainnet\"\n");
        assert!(matches!(result, Err(PushError::Config(_))));
    }

    #[test]
    fn test_zero_limit_rejected() {
        match PushConfig::from_toml("[push]\nnotification_limit = 0\n") {
            Err(PushError::Config(msg)) => assert!(msg.contains("notification_limit")),
            other => panic!("Expected Config error, got: {:?}", other),
        }
        assert!(PushConfig::from_toml("[push]\nchat_history_limit = 0\n").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = PushConfig::default();
        config.push.env = Env::Dev;
        config.push.notification_limit = 5;
        config.logging.level = "pushlink=debug".to_string();

        config.save(&path).unwrap();
        let loaded = PushConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        match PushConfig::load(&path) {
            Err(PushError::Config(msg)) => assert!(msg.contains("Failed to read config file")),
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = PushConfig::default_path() {
            assert!(path.ends_with("pushlink/config.toml"));
        }
    }
}
