//! Mock KMS backend for testing.

use super::Kms;
use crate::error::{CipherError, Result};

const PREFIX: &[u8] = b"mock-kms:";

/// Reversible byte scrambling with a fixed prefix.
///
/// NOT cryptographically secure, just exercises the plumbing. Any blob
/// without the prefix fails to decrypt, which is how tests model a
/// tampered or foreign ciphertext.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockKms;

impl Kms for MockKms {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut blob = PREFIX.to_vec();
        blob.extend(plaintext.iter().map(|b| b ^ 0x5a));
        Ok(blob)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let body = ciphertext
            .strip_prefix(PREFIX)
            .ok_or_else(|| CipherError::Backend("not a mock-kms ciphertext".to_string()))?;
        Ok(body.iter().map(|b| b ^ 0x5a).collect())
    }
}
