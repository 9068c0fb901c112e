//! Encrypt command - encrypt a value into a secret file.

use std::path::Path;

use tracing::info;

use crate::cli::{output, GlobalArgs};
use crate::core::cipher;
use crate::core::domain::Secret;
use crate::core::sync;
use crate::error::{Result, SecretError};

/// Encrypt `value` under `key` and upsert it into `file`.
pub fn execute(key: &str, value: &str, file: &Path, global: &GlobalArgs) -> Result<()> {
    if key.is_empty() {
        return Err(SecretError::EmptyKey.into());
    }
    info!(key, file = %file.display(), "running encrypt");

    let config = global.config()?;
    let kms = cipher::from_config(&config)?;

    let ciphertext = cipher::encrypt_base64(kms.as_ref(), key, value)?;
    sync::upsert_file(file, Secret::new(key, ciphertext))?;

    output::success(&format!("encrypted {} into {}", key, file.display()));
    Ok(())
}
