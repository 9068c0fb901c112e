//! Error types.
//!
//! Each concern has its own error enum; `Error` wraps them so `?` works
//! across module boundaries. File and parse failures are fatal to a run,
//! while decryption failures are collected by the validator and surface
//! only as the aggregate `ValidationError`.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Secret file errors. Always fatal.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read secret file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write secret file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse secret file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize secrets: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// Key-management errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("failed to decrypt {key}: {reason}")]
    DecryptionFailed { key: String, reason: String },

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("KMS error: {0}")]
    Backend(String),

    #[error("invalid base64 for {key}: {reason}")]
    InvalidBase64 { key: String, reason: String },

    #[error("invalid age identity: {0}")]
    InvalidIdentity(String),

    #[error("no identity file at {0}")]
    NoIdentity(PathBuf),

    #[error("KMS backend not available: {0}")]
    Unavailable(String),
}

/// Remote store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt store document {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("invalid namespace '{0}'")]
    InvalidNamespace(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("missing config field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Secret collection errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SecretError {
    #[error("duplicate secret key: {0}")]
    DuplicateKey(String),

    #[error("secret key cannot be empty")]
    EmptyKey,
}

/// Aggregate validation failure, raised after every file was checked.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("some secrets are invalid ({secrets} in {files} file(s))")]
    InvalidSecrets { files: usize, secrets: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
