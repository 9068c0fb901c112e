//! YAML secret file codec.
//!
//! A secret file is a top-level sequence of mappings, each with a `key` and
//! a `value` scalar:
//!
//! ```yaml
//! - key: DATABASE_URL
//!   value: AQICAHh...
//! - key: db_password
//!   value: AQICAHi...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::core::constants;
use crate::core::domain::Secret;
use crate::error::{FileError, Result};

/// Load secrets from a YAML file.
///
/// The returned list keeps file order.
///
/// # Errors
///
/// Returns `FileError::Read` if the file cannot be read, or
/// `FileError::Parse` if it is not a valid secret document.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Secret>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading secret file");

    let body = fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let secrets = parse(&body, path)?;
    debug!(path = %path.display(), secrets = secrets.len(), "secret file loaded");
    Ok(secrets)
}

/// Parse a YAML document. `origin` is only used in error messages.
///
/// An empty document is an empty list.
///
/// # Errors
///
/// Returns `FileError::Parse` on malformed YAML or a missing field.
pub fn parse(body: &[u8], origin: &Path) -> Result<Vec<Secret>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let secrets: Option<Vec<Secret>> =
        serde_yaml::from_slice(body).map_err(|source| FileError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

    Ok(secrets.unwrap_or_default())
}

/// Serialize secrets in the given order.
///
/// # Errors
///
/// Returns `FileError::Serialize` if serialization fails.
pub fn to_string(secrets: &[Secret]) -> Result<String> {
    serde_yaml::to_string(secrets).map_err(|e| FileError::Serialize(e).into())
}

/// Save secrets to a YAML file, in the given order.
///
/// Writes a sibling temp file and renames it over the target, so an
/// interrupted write never leaves a truncated file behind.
///
/// # Errors
///
/// Returns `FileError::Write` if the file cannot be written.
pub fn save(secrets: &[Secret], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), secrets = secrets.len(), "saving secret file");

    let body = to_string(secrets)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let write_err = |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    fs::write(&tmp_path, body).map_err(write_err)?;
    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(source).into());
    }

    trace!(path = %path.display(), "secret file saved");
    Ok(())
}

/// Whether a file name looks like a secret file.
///
/// Dotfiles are never secret files.
pub fn is_secret_file(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| constants::YAML_EXTENSIONS.contains(&ext))
}

/// List the secret files directly inside `dir`, sorted by name.
///
/// Non-matching entries and subdirectories are skipped.
///
/// # Errors
///
/// Returns `FileError::ReadDir` if the directory cannot be read.
pub fn secret_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let read_err = |source| FileError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_secret_file(name) {
            trace!(name, "skipping non-secret entry");
            continue;
        }
        if entry.file_type().map_err(read_err)?.is_dir() {
            continue;
        }
        files.push(entry.path());
    }

    files.sort();
    Ok(files)
}
