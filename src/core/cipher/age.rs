//! Age KMS backend.
//!
//! Uses a local x25519 identity as the key-management key. Ciphertext is
//! the binary age format, which the caller base64-encodes.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use ::age::secrecy::ExposeSecret;
use ::age::x25519;
use tracing::{debug, trace};

use super::Kms;
use crate::error::{CipherError, Result};

/// Age-based KMS backend bound to one identity.
pub struct AgeKms {
    identity: x25519::Identity,
    recipient: x25519::Recipient,
}

impl AgeKms {
    /// Wrap an existing identity.
    pub fn new(identity: x25519::Identity) -> Self {
        let recipient = identity.to_public();
        Self {
            identity,
            recipient,
        }
    }

    /// Load an identity file.
    ///
    /// The first line starting with `AGE-SECRET-KEY-` is used; comment lines
    /// (as written by `age-keygen`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::NoIdentity` if the file is missing, or
    /// `CipherError::InvalidIdentity` if no valid key is found.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading age identity");

        if !path.exists() {
            return Err(CipherError::NoIdentity(path.to_path_buf()).into());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(path)?.permissions().mode() & 0o777;
            if mode & 0o077 != 0 {
                tracing::warn!(
                    path = %path.display(),
                    mode = format!("{:o}", mode),
                    "identity file is readable by other users"
                );
            }
        }

        let contents = fs::read_to_string(path)?;
        let line = contents
            .lines()
            .map(str::trim)
            .find(|l| l.starts_with("AGE-SECRET-KEY-"))
            .ok_or_else(|| {
                CipherError::InvalidIdentity(format!("no secret key in {}", path.display()))
            })?;

        let identity: x25519::Identity = line
            .parse()
            .map_err(|e: &str| CipherError::InvalidIdentity(e.to_string()))?;

        Ok(Self::new(identity))
    }

    /// Generate a new identity and write it to `path` (0600 on Unix).
    ///
    /// Returns the public key. Refuses to overwrite an existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists or cannot be written.
    pub fn generate(path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        if path.exists() {
            return Err(CipherError::InvalidIdentity(format!(
                "{} already exists",
                path.display()
            ))
            .into());
        }

        let identity = x25519::Identity::generate();
        let public_key = identity.to_public().to_string();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let secret = identity.to_string();
        fs::write(
            path,
            format!(
                "# public key: {}\n{}\n",
                public_key,
                secret.expose_secret()
            ),
        )?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %path.display(), "generated age identity");
        Ok(public_key)
    }

    /// Public key matching the loaded identity.
    pub fn public_key(&self) -> String {
        self.recipient.to_string()
    }
}

impl std::fmt::Debug for AgeKms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgeKms")
            .field("recipient", &self.recipient.to_string())
            .finish_non_exhaustive()
    }
}

impl Kms for AgeKms {
    fn name(&self) -> &'static str {
        "age"
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "encrypting with age");

        let encryptor = ::age::Encryptor::with_recipients(std::iter::once(
            &self.recipient as &dyn ::age::Recipient,
        ))
        .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        writer.write_all(plaintext)?;
        writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        Ok(encrypted)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting with age");

        let decryptor =
            ::age::Decryptor::new(ciphertext).map_err(|e| CipherError::Backend(format!("{}", e)))?;

        let mut reader = decryptor
            .decrypt(std::iter::once(&self.identity as &dyn ::age::Identity))
            .map_err(|e| CipherError::Backend(format!("{}", e)))?;

        let mut decrypted = Vec::new();
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| CipherError::Backend(format!("{}", e)))?;

        Ok(decrypted)
    }
}
