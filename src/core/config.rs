//! Configuration file management.
//!
//! Handles reading, writing, and validating `valise.toml`:
//!
//! ```toml
//! [kms]
//! backend = "age"                        # "age" (default) or "aws"
//! identity = "~/.valise/identity.txt"    # age identity file
//! key_id = "arn:aws:kms:..."             # AWS key used by `encrypt`
//!
//! [store]
//! path = "~/.valise/store"               # filesystem store root
//! ```
//!
//! A missing `valise.toml` in the working directory means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `valise.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Key-management backend settings
    #[serde(default)]
    pub kms: KmsConfig,
    /// Remote store settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// Key-management backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmsConfig {
    /// Backend name: "age" or "aws"
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Age identity file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<PathBuf>,
    /// AWS KMS key ID or ARN, used for encryption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

impl Default for KmsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            identity: None,
            key_id: None,
        }
    }
}

fn default_backend() -> String {
    "age".to_string()
}

/// Remote store settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory of the filesystem store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// `./valise.toml` is read if present, otherwise defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit file,
    /// `ConfigError::Parse` for malformed TOML, or a validation error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(constants::CONFIG_FILE), false),
        };
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            if required {
                return Err(ConfigError::NotFound(path).into());
            }
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let config = Self::parse(&contents)?;

        debug!(backend = %config.kms.backend, "config loaded");
        Ok(config)
    }

    /// Parse and validate TOML contents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or a validation error.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Checks:
    /// - `kms.backend` is a known backend
    /// - `kms.key_id`, when set, is not blank
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        match self.kms.backend.as_str() {
            "age" | "aws" | "mock" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "kms.backend",
                    reason: format!("unknown backend '{}'. Supported: age, aws", other),
                }
                .into());
            }
        }

        if let Some(key_id) = &self.kms.key_id {
            if key_id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "kms.key_id",
                    reason: "cannot be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Path of the age identity file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if no identity is configured and
    /// the home directory cannot be determined.
    pub fn identity_path(&self) -> Result<PathBuf> {
        match &self.kms.identity {
            Some(p) => Ok(expand_home(p)),
            None => Ok(data_dir()
                .ok_or(ConfigError::MissingField {
                    field: "kms.identity",
                })?
                .join(constants::IDENTITY_FILE)),
        }
    }

    /// Root directory of the filesystem store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if no path is configured and the
    /// home directory cannot be determined.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(p) => Ok(expand_home(p)),
            None => Ok(data_dir()
                .ok_or(ConfigError::MissingField { field: "store.path" })?
                .join(constants::STORE_DIR)),
        }
    }
}

/// `~/.valise`, if the home directory is known.
fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(constants::DATA_DIR))
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
