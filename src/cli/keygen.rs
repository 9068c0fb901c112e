//! Keygen command - create an age identity for the age backend.

use std::path::PathBuf;

use crate::cli::{output, GlobalArgs};
use crate::core::cipher::AgeKms;
use crate::error::Result;

/// Generate an identity at `out`, or at the configured identity path.
pub fn execute(out: Option<PathBuf>, global: &GlobalArgs) -> Result<()> {
    let path = match out {
        Some(p) => p,
        None => global.config()?.identity_path()?,
    };

    let public_key = AgeKms::generate(&path)?;

    output::success(&format!("identity written to {}", path.display()));
    println!("public key: {}", public_key);
    Ok(())
}
