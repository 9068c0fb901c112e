//! Result types for validation and sync runs.

use std::path::{Path, PathBuf};

use crate::core::types::{Namespace, SecretKey};
use crate::error::{Result, ValidationError};

/// A secret whose value failed to decrypt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSecret {
    pub key: SecretKey,
    pub reason: String,
}

/// Outcome of checking every secret in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    path: PathBuf,
    checked: usize,
    invalid: Vec<InvalidSecret>,
}

impl FileReport {
    pub(crate) fn new(path: PathBuf, checked: usize, invalid: Vec<InvalidSecret>) -> Self {
        Self {
            path,
            checked,
            invalid,
        }
    }

    /// Path of the checked file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of secrets checked.
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Secrets that failed to decrypt, in file order.
    pub fn invalid(&self) -> &[InvalidSecret] {
        &self.invalid
    }

    /// Whether every secret in the file decrypted.
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Outcome of a directory run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    files: Vec<FileReport>,
}

impl RunReport {
    pub(crate) fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    /// Per-file reports in visit order.
    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Whether any file had any invalid secret.
    pub fn has_invalid(&self) -> bool {
        self.files.iter().any(|f| !f.is_valid())
    }

    /// Total number of invalid secrets.
    pub fn invalid_count(&self) -> usize {
        self.files.iter().map(|f| f.invalid.len()).sum()
    }

    /// Convert into the run-level result.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidSecrets` if any secret failed.
    pub fn into_result(self) -> Result<Self> {
        if self.has_invalid() {
            let files = self.files.iter().filter(|f| !f.is_valid()).count();
            return Err(ValidationError::InvalidSecrets {
                files,
                secrets: self.invalid_count(),
            }
            .into());
        }
        Ok(self)
    }
}

/// Outcome of syncing one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub namespace: Namespace,
    /// Keys written to the store.
    pub upserted: Vec<SecretKey>,
    /// Keys removed from the store.
    pub deleted: Vec<SecretKey>,
}

impl SyncReport {
    /// Whether the store was left untouched.
    pub fn is_noop(&self) -> bool {
        self.upserted.is_empty() && self.deleted.is_empty()
    }
}
