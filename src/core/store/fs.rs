//! Filesystem-based store implementation.
//!
//! Keeps one JSON document per namespace under a root directory
//! (`<root>/<namespace>.json`). Writes go through a temp file and a rename.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{validate_namespace, Store};
use crate::core::collection;
use crate::core::domain::Secret;
use crate::core::types::{EncryptedValue, Namespace, SecretKey};
use crate::error::{Result, StoreError};

const EXTENSION: &str = "json";

/// On-disk namespace document.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    updated_at: DateTime<Utc>,
    #[serde(default)]
    secrets: BTreeMap<SecretKey, EncryptedValue>,
}

/// Filesystem store rooted at a directory.
#[derive(Debug, Clone)]
pub struct Filesystem {
    root: PathBuf,
}

impl Filesystem {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, namespace: &str) -> Result<PathBuf> {
        validate_namespace(namespace)?;
        Ok(self.root.join(format!("{}.{}", namespace, EXTENSION)))
    }

    fn read(&self, path: &Path) -> Result<BTreeMap<SecretKey, EncryptedValue>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: Document = serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(doc.secrets)
    }

    fn write(&self, path: &Path, secrets: BTreeMap<SecretKey, EncryptedValue>) -> Result<()> {
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        if secrets.is_empty() {
            trace!(path = %path.display(), "namespace empty, removing document");
            return match fs::remove_file(path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(write_err(e).into()),
                _ => Ok(()),
            };
        }

        fs::create_dir_all(&self.root).map_err(write_err)?;

        let doc = Document {
            updated_at: Utc::now(),
            secrets,
        };
        let contents = serde_json::to_string_pretty(&doc)
            .map_err(|e| StoreError::Backend(format!("failed to serialize namespace: {}", e)))?;

        let tmp_path = self.root.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        fs::write(&tmp_path, contents).map_err(write_err)?;
        fs::rename(&tmp_path, path).map_err(write_err)?;

        Ok(())
    }
}

impl Store for Filesystem {
    fn list(&self, namespace: &str) -> Result<Vec<Secret>> {
        let path = self.document_path(namespace)?;
        debug!(namespace, "listing namespace");
        Ok(collection::from_map(self.read(&path)?))
    }

    fn put(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let path = self.document_path(namespace)?;
        trace!(namespace, key, "put");

        let mut secrets = self.read(&path)?;
        secrets.insert(key.to_string(), value.to_string());
        self.write(&path, secrets)
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<()> {
        let path = self.document_path(namespace)?;
        trace!(namespace, key, "delete");

        let mut secrets = self.read(&path)?;
        if secrets.remove(key).is_none() {
            return Ok(());
        }
        self.write(&path, secrets)
    }

    fn namespaces(&self) -> Result<Vec<Namespace>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let read_err = |source| StoreError::Read {
            path: self.root.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_namespace(stem).is_ok() {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}
