//! TOML configuration file loading
//!
//! The file is optional. When `--config-file` is given it must exist;
//! otherwise `<config_dir>/Sensorpipe/sensorpipe.toml` is used if present.
//! Command-line values always win over anything loaded here.

use crate::core::error_handling::ContextualError;
use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory under the platform config dir holding the config file
pub const CONFIG_DIR_NAME: &str = "Sensorpipe";
pub const CONFIG_FILE_NAME: &str = "sensorpipe.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value in configuration file {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { .. } => Some("The specified configuration file does not exist"),
            ConfigError::Parse { .. } => Some("The configuration file is not valid TOML"),
            ConfigError::Invalid { message, .. } => Some(message.as_str()),
            ConfigError::Read { .. } => None,
        }
    }
}

/// Values read from the configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
    #[serde(default)]
    pub sensor: SensorSection,
    #[serde(default)]
    pub monitor: MonitorSection,
}

/// `[sensor]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorSection {
    /// Seconds between readings
    pub interval: Option<u64>,
}

/// `[monitor]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    pub buffer_size: Option<usize>,
    /// Seconds to wait after the sensor disconnects
    pub disconnect_grace: Option<u64>,
    pub echo: Option<bool>,
}

impl FileConfig {
    /// Parse and validate configuration text
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: FileConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|message| ConfigError::Invalid {
            path: origin.to_path_buf(),
            message,
        })?;
        Ok(config)
    }

    /// Check values serde cannot express as types
    pub fn validate(&self) -> Result<(), String> {
        if let Some(level) = self.log_level.as_deref() {
            if !LOG_LEVELS.contains(&level) {
                return Err(format!(
                    "log_level '{}' must be one of: {}",
                    level,
                    LOG_LEVELS.join(", ")
                ));
            }
        }
        if let Some(format) = self.log_format.as_deref() {
            if !LOG_FORMATS.contains(&format) {
                return Err(format!(
                    "log_format '{}' must be one of: {}",
                    format,
                    LOG_FORMATS.join(", ")
                ));
            }
        }
        if self.monitor.buffer_size == Some(0) {
            return Err("monitor.buffer_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Default configuration file location, if the platform has a config dir
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the configuration file
///
/// An explicit path must exist. Without one, the default location is tried
/// and an absent file yields an empty configuration.
pub async fn load(config_file: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            path.to_path_buf()
        }
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No configuration file found; using defaults");
                return Ok(FileConfig::default());
            }
        },
    };

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
    FileConfig::from_toml_str(&contents, &path)
}
