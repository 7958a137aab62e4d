//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `solarlight.toml` in the working directory, or at the path in
//! `SOLARLIGHT_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use solarlight_adapter_mqtt::MqttConfig;
use solarlight_domain::error::SolarLightError;
use solarlight_domain::trigger::TriggerConfig;

const DEFAULT_PATH: &str = "solarlight.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// MQTT broker and topics.
    pub mqtt: MqttConfig,
    /// Triggers, evaluated and published in this order.
    pub triggers: Vec<TriggerConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax), e.g. `info` or `debug`.
    pub filter: String,
}

/// Where the configuration came from.
#[derive(Debug)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// The file could not be read; built-in defaults were used.
    Defaults {
        path: PathBuf,
        reason: std::io::Error,
    },
}

impl Config {
    /// Load configuration from the config file (if readable) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if the result
    /// fails validation.
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        let path = std::env::var("SOLARLIGHT_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_PATH), PathBuf::from);
        let (mut config, source) = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok((config, source))
    }

    fn from_file(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = toml::from_str(&content).map_err(ConfigError::Parse)?;
                Ok((config, ConfigSource::File(path.to_path_buf())))
            }
            Err(reason) => Ok((
                Self::default(),
                ConfigSource::Defaults {
                    path: path.to_path_buf(),
                    reason,
                },
            )),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("SOLARLIGHT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("SOLARLIGHT_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(val) = lookup("SOLARLIGHT_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.broker_port = port;
            }
        }
        if let Some(val) = lookup("SOLARLIGHT_MQTT_USERNAME") {
            self.mqtt.username = Some(val);
        }
        if let Some(val) = lookup("SOLARLIGHT_MQTT_PASSWORD") {
            self.mqtt.password = Some(val);
        }
        if let Some(val) = lookup("SOLARLIGHT_MQTT_CLIENT_ID") {
            self.mqtt.client_id = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "mqtt.broker_port must be non-zero".to_string(),
            ));
        }
        if self.mqtt.solar_radiation_topic.trim().is_empty() {
            return Err(ConfigError::Validation(
                "mqtt.solar_radiation_topic must not be empty".to_string(),
            ));
        }
        for (index, trigger) in self.triggers.iter().enumerate() {
            trigger
                .validate()
                .map_err(|source| ConfigError::InvalidTrigger { index, source })?;
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// A trigger definition breaks a domain invariant.
    #[error("invalid trigger at position {index}")]
    InvalidTrigger {
        index: usize,
        #[source]
        source: SolarLightError,
    },
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
