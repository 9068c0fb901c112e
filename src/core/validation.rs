//! Secret validation.
//!
//! Checks that every value declared in a directory of secret files can be
//! decrypted by the configured KMS key.
//!
//! Two failure policies apply:
//! - A file that cannot be read or parsed aborts the whole run at once.
//! - A value that fails to decrypt is recorded and reported, and checking
//!   continues with the next secret and the next file. The run fails at the
//!   end, via [`RunReport::into_result`], if anything was recorded.

use std::path::Path;

use tracing::{debug, info};

use crate::core::cipher::{self, Kms};
use crate::core::domain::{FileReport, InvalidSecret, RunReport, Secret};
use crate::core::yaml;
use crate::error::Result;

/// Progress notifications, delivered as soon as each thing is known.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// About to load and check a file.
    FileStarted(&'a Path),
    /// A secret in the current file failed to decrypt.
    InvalidSecret(&'a InvalidSecret),
    /// Every secret in a file was checked.
    FileFinished(&'a FileReport),
}

/// Runs decryption checks against one KMS backend.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'k> {
    kms: &'k dyn Kms,
}

impl<'k> Validator<'k> {
    /// Create a validator using `kms` for every check.
    pub fn new(kms: &'k dyn Kms) -> Self {
        Self { kms }
    }

    /// Check a single secret.
    ///
    /// Returns the failure, if any. The plaintext is discarded.
    pub fn check(&self, secret: &Secret) -> Option<InvalidSecret> {
        match cipher::decrypt_base64(self.kms, secret.key(), secret.value()) {
            Ok(_) => None,
            Err(e) => Some(InvalidSecret {
                key: secret.key().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Check every secret of an already loaded file.
    ///
    /// Never stops early: all secrets are checked and every failure is
    /// reported before the file report is built.
    pub fn validate_secrets<F>(
        &self,
        path: &Path,
        secrets: &[Secret],
        on_event: &mut F,
    ) -> FileReport
    where
        F: FnMut(Event<'_>),
    {
        let mut invalid = Vec::new();

        for secret in secrets {
            if let Some(failure) = self.check(secret) {
                debug!(path = %path.display(), key = %failure.key, "invalid secret");
                on_event(Event::InvalidSecret(&failure));
                invalid.push(failure);
            }
        }

        FileReport::new(path.to_path_buf(), secrets.len(), invalid)
    }

    /// Load and check one file.
    ///
    /// # Errors
    ///
    /// Returns `FileError` if the file cannot be read or parsed. Decryption
    /// failures are in the returned report, not in the error.
    pub fn validate_file<F>(&self, path: &Path, on_event: &mut F) -> Result<FileReport>
    where
        F: FnMut(Event<'_>),
    {
        on_event(Event::FileStarted(path));

        let secrets = yaml::load(path)?;
        let report = self.validate_secrets(path, &secrets, on_event);

        on_event(Event::FileFinished(&report));
        Ok(report)
    }

    /// Check every secret file in `dir`, in file name order.
    ///
    /// # Errors
    ///
    /// Returns `FileError` as soon as the directory or any file cannot be
    /// read or parsed. The returned report may still contain invalid
    /// secrets; call [`RunReport::into_result`] for the run-level verdict.
    pub fn validate_dir<F>(&self, dir: &Path, on_event: &mut F) -> Result<RunReport>
    where
        F: FnMut(Event<'_>),
    {
        let files = yaml::secret_files(dir)?;
        info!(dir = %dir.display(), files = files.len(), backend = self.kms.name(), "validating");

        let mut run = RunReport::default();
        for path in &files {
            run.push(self.validate_file(path, on_event)?);
        }

        debug!(
            files = run.files().len(),
            invalid = run.invalid_count(),
            "validation finished"
        );
        Ok(run)
    }
}
