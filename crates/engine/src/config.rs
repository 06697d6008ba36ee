//! Configuration via `dsview.toml`
//!
//! One flat file holding what the browser needs to reach its store. A default
//! file is written on first start; edit it and restart to change settings.

use crate::store::StoreMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dsview.toml";

/// Errors raised while loading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("failed to access config file '{path}': {reason}")]
    Read {
        /// File path
        path: String,
        /// I/O failure detail
        reason: String,
    },

    /// File content is not valid TOML for this schema
    #[error("failed to parse config file '{path}': {reason}")]
    Parse {
        /// File path, or `<inline>` for string input
        path: String,
        /// Parser message
        reason: String,
    },

    /// A field holds an unusable value
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Browser configuration loaded from `dsview.toml`.
///
/// # Example
///
/// ```toml
/// port = "8080"
/// project_id = "my-project"
/// # emulator_host = "localhost:8081"
/// # entities = "Player,Item"
/// property_sample_size = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsviewConfig {
    /// Port the browser listens on.
    #[serde(default = "default_port")]
    pub port: String,
    /// Project whose store is browsed.
    #[serde(default)]
    pub project_id: String,
    /// Emulator address; when set, the store client targets the emulator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emulator_host: Option<String>,
    /// Comma-separated kind list. Setting it disables metadata queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<String>,
    /// Entities sampled per kind when inferring properties without metadata.
    #[serde(default = "default_property_sample_size")]
    pub property_sample_size: usize,
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_property_sample_size() -> usize {
    1
}

impl Default for DsviewConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            project_id: String::new(),
            emulator_host: None,
            entities: None,
            property_sample_size: default_property_sample_size(),
        }
    }
}

impl DsviewConfig {
    /// Decide how kinds and properties are discovered.
    ///
    /// A non-empty `entities` list selects [`StoreMode::Firestore`]. Kind names
    /// are trimmed and empty entries skipped.
    pub fn store_mode(&self) -> StoreMode {
        match self.entities.as_deref() {
            Some(list) if !list.trim().is_empty() => StoreMode::Firestore {
                kinds: list
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
            _ => StoreMode::Datastore,
        }
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a non-numeric port or a zero
    /// sample size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port.parse::<u16>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "port '{}' is not a valid TCP port",
                self.port
            )));
        }
        if self.property_sample_size == 0 {
            return Err(ConfigError::Invalid(
                "property_sample_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Log the effective configuration at startup.
    pub fn log_startup(&self) {
        info!(
            target: "dsview::config",
            port = %self.port,
            project_id = %self.project_id,
            emulator_host = self.emulator_host.as_deref().unwrap_or(""),
            entities = self.entities.as_deref().unwrap_or(""),
            property_sample_size = self.property_sample_size,
            "Starting with configuration"
        );
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# dsview configuration
#
# Port the browser listens on (default: "8080")
port = "8080"

# Project whose store is browsed
project_id = ""

# Emulator address, e.g. "localhost:8081" (optional)
# emulator_host = "localhost:8081"

# Comma-separated kinds to browse. Set this when the store has no
# metadata queries; properties are then inferred by sampling entities.
# entities = "Player,Item"

# Entities sampled per kind when inferring properties (default: 1)
property_sample_size = 1
"#
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: DsviewConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| ConfigError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
