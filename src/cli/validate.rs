//! Validate command - check every secret in a directory decrypts.

use std::path::Path;

use tracing::info;

use crate::cli::{output, GlobalArgs};
use crate::core::cipher;
use crate::core::validation::{Event, Validator};
use crate::error::Result;

/// Validate every secret file in `dir`.
///
/// Invalid keys are printed as they are found; the run fails once every
/// file has been checked.
pub fn execute(dir: &Path, global: &GlobalArgs) -> Result<()> {
    info!(dir = %dir.display(), "running validate");

    let config = global.config()?;
    let kms = cipher::from_config(&config)?;
    let validator = Validator::new(kms.as_ref());

    let run = validator.validate_dir(dir, &mut |event| match event {
        Event::FileStarted(path) => output::file(path.display()),
        Event::InvalidSecret(invalid) => output::invalid_key(&invalid.key, &invalid.reason),
        Event::FileFinished(_) => {}
    })?;

    let run = run.into_result()?;
    let checked: usize = run.files().iter().map(|f| f.checked()).sum();
    output::success(&format!(
        "all secrets are valid ({} in {} file{})",
        checked,
        run.files().len(),
        if run.files().len() == 1 { "" } else { "s" }
    ));

    Ok(())
}
