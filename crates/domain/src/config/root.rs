use serde::{Deserialize, Serialize};

use super::codec::CodecConfig;
use super::errors::ConfigError;
use super::hosts::HostsConfig;
use super::logging::LoggingConfig;

/// Largest message a 16-bit TCP length prefix can frame.
const MAX_FRAMED_MESSAGE: usize = 65_535;

/// Header size; anything smaller can never decode.
const HEADER_LEN: usize = 12;

/// Main configuration structure for Ferrous Wire
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub hosts: HostsConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-wire.toml in current directory
    /// 3. /etc/ferrous-wire/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(strict) = overrides.strict_counts {
            self.codec.strict_counts = strict;
        }
        if let Some(size) = overrides.max_message_size {
            self.codec.max_message_size = size;
        }
        if let Some(hosts) = overrides.hosts_path {
            self.hosts.path = Some(hosts);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.codec.max_message_size < HEADER_LEN {
            return Err(ConfigError::Validation(format!(
                "max_message_size must be at least {} bytes",
                HEADER_LEN
            )));
        }

        if self.codec.max_message_size > MAX_FRAMED_MESSAGE {
            return Err(ConfigError::Validation(format!(
                "max_message_size cannot exceed {} bytes",
                MAX_FRAMED_MESSAGE
            )));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Log level cannot be empty".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "Unknown log format '{}' (expected \"text\" or \"json\")",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("ferrous-wire.toml").exists() {
            Some("ferrous-wire.toml".to_string())
        } else if std::path::Path::new("/etc/ferrous-wire/config.toml").exists() {
            Some("/etc/ferrous-wire/config.toml".to_string())
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub strict_counts: Option<bool>,
    pub max_message_size: Option<usize>,
    pub hosts_path: Option<String>,
}
