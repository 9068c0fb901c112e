//! Conversions between secret lists and key-value maps.
//!
//! A list read from a file keeps its file order. A list built from a map is
//! always returned in canonical order (ascending by key, then value), so
//! output written from remote state is stable across runs.

use std::collections::HashMap;

use crate::core::domain::Secret;
use crate::core::types::SecretMap;
use crate::error::{Result, SecretError};

/// Build a key-to-value map.
///
/// Later entries overwrite earlier ones that share a key. Use
/// [`to_map_strict`] when duplicates must be rejected.
pub fn to_map(secrets: &[Secret]) -> SecretMap {
    secrets
        .iter()
        .map(|s| (s.key().to_string(), s.value().to_string()))
        .collect()
}

/// Build a key-to-value map, failing on the first repeated key.
///
/// # Errors
///
/// Returns `SecretError::DuplicateKey` naming the repeated key.
pub fn to_map_strict(secrets: &[Secret]) -> Result<SecretMap> {
    let mut map = SecretMap::with_capacity(secrets.len());
    for secret in secrets {
        if map
            .insert(secret.key().to_string(), secret.value().to_string())
            .is_some()
        {
            return Err(SecretError::DuplicateKey(secret.key().to_string()).into());
        }
    }
    Ok(map)
}

/// Borrowing variant of [`to_map`], same last-write-wins policy.
pub(crate) fn to_map_ref(secrets: &[Secret]) -> HashMap<&str, &str> {
    secrets.iter().map(|s| (s.key(), s.value())).collect()
}

/// Build one secret per map entry, in canonical order.
pub fn from_map<I, K, V>(map: I) -> Vec<Secret>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let secrets = map.into_iter().map(|(k, v)| Secret::new(k, v)).collect();
    canonical(secrets)
}

/// Sort a list into canonical order.
pub fn canonical(mut secrets: Vec<Secret>) -> Vec<Secret> {
    secrets.sort();
    secrets
}

/// Whether a list is already in canonical order.
pub fn is_canonical(secrets: &[Secret]) -> bool {
    secrets.windows(2).all(|w| w[0] <= w[1])
}
