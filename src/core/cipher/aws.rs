//! AWS KMS backend.
//!
//! Encrypts secrets using AWS Key Management Service.
//! Enable with `--features aws`.
//!
//! ## Usage
//!
//! ```toml
//! [kms]
//! backend = "aws"
//! key_id = "arn:aws:kms:us-east-1:123456789012:key/12345678-1234-1234-1234-123456789012"
//! ```
//!
//! Credentials come from the environment (AWS_ACCESS_KEY_ID, etc.) or the
//! default credential provider chain. Decryption does not need `key_id`:
//! KMS records the key in the ciphertext blob.

use tracing::trace;

use super::Kms;
use crate::error::{CipherError, Result};

/// AWS KMS backend.
///
/// Holds one current-thread runtime and one client for the whole run, so
/// validating a large directory does not rebuild them per secret.
pub struct AwsKms {
    key_id: Option<String>,
    runtime: tokio::runtime::Runtime,
    client: aws_sdk_kms::Client,
}

impl AwsKms {
    /// Create a backend. `key_id` is only required for encryption.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Unavailable` if the runtime cannot be created.
    pub fn new(key_id: Option<String>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CipherError::Unavailable(format!("failed to create runtime: {}", e)))?;

        let config =
            runtime.block_on(aws_config::load_defaults(aws_config::BehaviorVersion::latest()));
        let client = aws_sdk_kms::Client::new(&config);

        Ok(Self {
            key_id,
            runtime,
            client,
        })
    }
}

impl std::fmt::Debug for AwsKms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsKms")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

impl Kms for AwsKms {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let key_id = self.key_id.as_deref().ok_or_else(|| {
            CipherError::EncryptionFailed("kms.key_id is required to encrypt".to_string())
        })?;

        trace!(key_id, plaintext_len = plaintext.len(), "encrypting with AWS KMS");

        self.runtime.block_on(async {
            let result = self
                .client
                .encrypt()
                .key_id(key_id)
                .plaintext(aws_sdk_kms::primitives::Blob::new(plaintext))
                .send()
                .await
                .map_err(|e| CipherError::EncryptionFailed(format!("KMS encrypt failed: {}", e)))?;

            let blob = result
                .ciphertext_blob()
                .ok_or_else(|| CipherError::EncryptionFailed("no ciphertext returned".into()))?;

            Ok::<_, crate::error::Error>(blob.as_ref().to_vec())
        })
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting with AWS KMS");

        self.runtime.block_on(async {
            let result = self
                .client
                .decrypt()
                .ciphertext_blob(aws_sdk_kms::primitives::Blob::new(ciphertext))
                .send()
                .await
                .map_err(|e| CipherError::Backend(format!("KMS decrypt failed: {}", e)))?;

            let plaintext = result
                .plaintext()
                .ok_or_else(|| CipherError::Backend("no plaintext returned".into()))?;

            Ok::<_, crate::error::Error>(plaintext.as_ref().to_vec())
        })
    }
}
