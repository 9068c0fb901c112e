//! Key-management operations.
//!
//! Secret values are encrypted by a key-management service (KMS) and stored
//! as standard base64. This module defines the `Kms` trait the engines are
//! handed, the base64 wire helpers, and the concrete backends.
//!
//! ## Backends
//!
//! - **age**: Default, always available. A local x25519 identity acts as the key.
//! - **AWS KMS**: Feature-gated (`aws`). Uses AWS Key Management Service.
//! - **mock**: Test builds and the `test-kms` feature. Not encryption.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Kms` trait in a new file
//! 2. Feature-gate if it pulls in a cloud SDK
//! 3. Add a `backend` name to [`from_config`]

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::config::Config;
use crate::error::{CipherError, ConfigError, Result};

mod age;

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(any(test, feature = "test-kms"))]
mod mock;

pub use age::AgeKms;

#[cfg(feature = "aws")]
pub use aws::AwsKms;

#[cfg(any(test, feature = "test-kms"))]
pub use mock::MockKms;

/// Key-management service.
///
/// Implementations work on raw bytes; callers use [`encrypt_base64`] and
/// [`decrypt_base64`] for the stored representation.
pub trait Kms: std::fmt::Debug {
    /// Backend name for display/config.
    fn name(&self) -> &'static str;

    /// Encrypt plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the backend refuses or fails.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt ciphertext bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the ciphertext was not produced for this key
    /// or has been tampered with.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// Encrypt a plaintext value and encode it as base64.
///
/// `key` names the secret in error messages.
///
/// # Errors
///
/// Returns `CipherError::EncryptionFailed` if the backend fails.
pub fn encrypt_base64(kms: &dyn Kms, key: &str, plaintext: &str) -> Result<String> {
    trace!(key, backend = kms.name(), plaintext_len = plaintext.len(), "encrypting");

    let blob = kms.encrypt(plaintext.as_bytes()).map_err(|e| {
        CipherError::EncryptionFailed(format!("{}: {}", key, e))
    })?;
    Ok(STANDARD.encode(blob))
}

/// Decode a base64 value and decrypt it.
///
/// The plaintext is zeroized on drop.
///
/// # Errors
///
/// Returns `CipherError::InvalidBase64` if the value is not base64, or
/// `CipherError::DecryptionFailed` if the backend rejects it or the
/// plaintext is not UTF-8.
pub fn decrypt_base64(kms: &dyn Kms, key: &str, value: &str) -> Result<Zeroizing<String>> {
    trace!(key, backend = kms.name(), ciphertext_len = value.len(), "decrypting");

    let blob = STANDARD
        .decode(value.trim())
        .map_err(|e| CipherError::InvalidBase64 {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

    let failed = |reason: String| CipherError::DecryptionFailed {
        key: key.to_string(),
        reason,
    };

    let bytes = Zeroizing::new(kms.decrypt(&blob).map_err(|e| failed(e.to_string()))?);
    let text = std::str::from_utf8(&bytes).map_err(|e| failed(format!("UTF-8 error: {}", e)))?;
    Ok(Zeroizing::new(text.to_string()))
}

/// Build the configured KMS backend.
///
/// # Errors
///
/// Returns `ConfigError` for an unknown backend, or `CipherError` if the
/// backend cannot be initialized (missing identity, feature not compiled).
pub fn from_config(config: &Config) -> Result<Box<dyn Kms>> {
    let backend = config.kms.backend.as_str();
    debug!(backend, "creating KMS backend");

    match backend {
        "age" => Ok(Box::new(AgeKms::load(config.identity_path()?)?)),
        "aws" => {
            #[cfg(feature = "aws")]
            {
                Ok(Box::new(AwsKms::new(config.kms.key_id.clone())?))
            }
            #[cfg(not(feature = "aws"))]
            {
                Err(CipherError::Unavailable(
                    "AWS KMS support not compiled. Rebuild with: cargo install valise --features aws"
                        .to_string(),
                )
                .into())
            }
        }
        "mock" => {
            #[cfg(any(test, feature = "test-kms"))]
            {
                Ok(Box::new(MockKms))
            }
            #[cfg(not(any(test, feature = "test-kms")))]
            {
                Err(CipherError::Unavailable(
                    "mock KMS is only available in test builds".to_string(),
                )
                .into())
            }
        }
        other => Err(ConfigError::InvalidValue {
            field: "kms.backend",
            reason: format!("unknown backend '{}'. Supported: age, aws", other),
        }
        .into()),
    }
}
