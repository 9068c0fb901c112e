//! Constants used throughout valise.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name.
pub const CONFIG_FILE: &str = "valise.toml";

/// Home-relative data directory (~/.valise).
pub const DATA_DIR: &str = ".valise";

/// Default age identity file name inside the data directory.
pub const IDENTITY_FILE: &str = "identity.txt";

/// Default filesystem store directory name inside the data directory.
pub const STORE_DIR: &str = "store";

/// File extensions recognized as secret files.
pub const YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "VALISE_LOG";
