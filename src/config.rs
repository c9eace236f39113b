use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the blob directory; defaults to the platform data dir
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Currency symbol prefixed to monetary amounts
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "£".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl AppConfig {
    /// Load configuration from the user config file and environment.
    /// Precedence: defaults < `~/.config/stakebook/config.toml` <
    /// `STAKEBOOK__`-prefixed environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("display.currency", default_currency())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?;

        if let Some(base) = dirs::config_dir() {
            let path = base.join("stakebook").join("config.toml");
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix("STAKEBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.display.currency.is_empty() {
            errors.push("display.currency must not be empty".to_string());
        }

        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "logging.level must be one of {LEVELS:?}, got '{}'",
                self.logging.level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.display.currency, "£");
        assert_eq!(cfg.logging.level, "warn");
        assert!(cfg.storage.data_dir.is_none());
    }

    #[test]
    fn validate_flags_bad_level_and_empty_currency() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "verbose".to_string();
        cfg.display.currency = String::new();
        let errors = cfg.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
