//! Remote store operations.
//!
//! The remote store keeps the encrypted values that deployed services read.
//! It is a flat key-value space partitioned into namespaces; valise maps one
//! secret file to one namespace (the file stem).
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `Store` trait
//! 2. Add the implementation in a new file (e.g., `dynamodb.rs`)
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Dynamo { /* ... */ }
//!
//! impl Store for Dynamo {
//!     fn list(&self, namespace: &str) -> Result<Vec<Secret>> {
//!         // Query by partition key
//!     }
//!     fn put(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
//!         // PutItem
//!     }
//!     fn delete(&self, namespace: &str, key: &str) -> Result<()> {
//!         // DeleteItem
//!     }
//!     fn namespaces(&self) -> Result<Vec<String>> {
//!         // Scan distinct partition keys
//!     }
//! }
//! ```

use crate::core::domain::Secret;
use crate::core::types::Namespace;
use crate::error::{Result, StoreError};

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::Memory;

/// Remote key-value store.
///
/// Operations are point calls with no retry; errors propagate to the caller.
pub trait Store {
    /// All secrets in a namespace. A missing namespace is empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the namespace cannot be read.
    fn list(&self, namespace: &str) -> Result<Vec<Secret>>;

    /// Insert or overwrite one secret.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    fn put(&self, namespace: &str, key: &str, value: &str) -> Result<()>;

    /// Remove one secret. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    fn delete(&self, namespace: &str, key: &str) -> Result<()>;

    /// Names of all non-empty namespaces, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be enumerated.
    fn namespaces(&self) -> Result<Vec<Namespace>>;
}

/// Check that a namespace name is usable as a single path component.
///
/// # Errors
///
/// Returns `StoreError::InvalidNamespace` for empty names, names starting
/// with a dot, or names containing path separators.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    let invalid = namespace.is_empty()
        || namespace.starts_with('.')
        || namespace.contains(['/', '\\'])
        || namespace.chars().any(char::is_control);

    if invalid {
        return Err(StoreError::InvalidNamespace(namespace.to_string()).into());
    }
    Ok(())
}
