//! Synchronization of local secret files to the remote store.
//!
//! The local file is the source of truth. A sync computes the upsert and
//! stale sets against the namespace's remote contents, removes stale keys
//! that are not being rewritten, then writes the upserts.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::collection;
use crate::core::domain::{Changes, Secret, SyncReport};
use crate::core::store::{validate_namespace, Store};
use crate::core::types::Namespace;
use crate::core::yaml;
use crate::error::{Error, FileError, Result};

/// Namespace for a secret file: its file stem.
///
/// # Errors
///
/// Returns `StoreError::InvalidNamespace` if the stem is not a usable name.
pub fn namespace_for(path: &Path) -> Result<Namespace> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    validate_namespace(&stem)?;
    Ok(stem)
}

/// Compare local secrets (source) with remote secrets (destination).
pub fn plan<'a>(local: &'a [Secret], remote: &'a [Secret]) -> Changes<'a> {
    Changes::compute(local, remote)
}

/// Apply planned changes to one namespace.
///
/// Deletes come first, then puts. A key whose value changed is only put, so
/// it is never missing from the store. The first store error aborts.
///
/// # Errors
///
/// Returns `StoreError` from the first failing call.
pub fn apply(store: &dyn Store, namespace: &str, changes: &Changes<'_>) -> Result<SyncReport> {
    let mut report = SyncReport {
        namespace: namespace.to_string(),
        upserted: Vec::new(),
        deleted: Vec::new(),
    };

    for secret in changes.removals() {
        debug!(namespace, key = secret.key(), "deleting stale secret");
        store.delete(namespace, secret.key())?;
        report.deleted.push(secret.key().to_string());
    }

    for secret in changes.upserts() {
        debug!(namespace, key = secret.key(), "writing secret");
        store.put(namespace, secret.key(), secret.value())?;
        report.upserted.push(secret.key().to_string());
    }

    info!(
        namespace,
        upserted = report.upserted.len(),
        deleted = report.deleted.len(),
        "namespace synced"
    );
    Ok(report)
}

/// Sync one secret file into its namespace.
///
/// With `dry_run` the store is only read; the report lists what would change.
/// A key repeated in the file resolves to its last value.
///
/// # Errors
///
/// Returns `FileError` if the file cannot be loaded, or `StoreError` if the
/// store fails.
pub fn sync_file(store: &dyn Store, path: &Path, dry_run: bool) -> Result<SyncReport> {
    let namespace = namespace_for(path)?;
    let declared = yaml::load(path)?;
    // a repeated key resolves to its last value, the same as `to_map`
    let local = collection::from_map(collection::to_map(&declared));
    if local.len() != declared.len() {
        warn!(
            path = %path.display(),
            duplicates = declared.len() - local.len(),
            "secret file repeats keys, last value wins"
        );
    }
    let remote = store.list(&namespace)?;
    let changes = plan(&local, &remote);

    if dry_run {
        return Ok(SyncReport {
            namespace,
            upserted: changes.upserts().iter().map(|s| s.key().to_string()).collect(),
            deleted: changes.removals().iter().map(|s| s.key().to_string()).collect(),
        });
    }

    apply(store, &namespace, &changes)
}

/// Sync every secret file in `dir`, in file name order.
///
/// Stops at the first error.
///
/// # Errors
///
/// Returns `FileError` or `StoreError` from the first failure.
pub fn sync_dir(store: &dyn Store, dir: &Path, dry_run: bool) -> Result<Vec<SyncReport>> {
    let files = yaml::secret_files(dir)?;
    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        reports.push(sync_file(store, path, dry_run)?);
    }
    Ok(reports)
}

/// Write a namespace's remote contents to a secret file in canonical order.
///
/// # Errors
///
/// Returns `StoreError` if the store fails, or `FileError` if the file
/// cannot be written.
pub fn dump(store: &dyn Store, namespace: &str, path: &Path) -> Result<usize> {
    let secrets = store.list(namespace)?;
    let secrets = collection::canonical(secrets);
    debug_assert!(collection::is_canonical(&secrets));
    yaml::save(&secrets, path)?;
    Ok(secrets.len())
}

/// Insert or replace one secret in a local file, keeping canonical order.
///
/// Creates the file if it does not exist.
///
/// # Errors
///
/// Returns `FileError` if the file cannot be read, parsed or written.
pub fn upsert_file(path: &Path, secret: Secret) -> Result<()> {
    let mut secrets = match yaml::load(path) {
        Ok(secrets) => secrets,
        Err(Error::File(FileError::Read { source, .. }))
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    secrets.retain(|s| s.key() != secret.key());
    secrets.push(secret);
    yaml::save(&collection::canonical(secrets), path)
}
