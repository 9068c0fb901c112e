//! Secret type.
//!
//! Represents a single secret with its key and base64 ciphertext.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::types::{EncryptedValue, SecretKey};

/// An encrypted secret with its key name.
///
/// Immutable once built. Field order is the on-disk field order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Secret {
    #[serde(deserialize_with = "non_empty_key")]
    key: SecretKey,
    value: EncryptedValue,
}

impl Secret {
    /// Create a new secret from a key and encrypted value
    pub fn new(key: impl Into<SecretKey>, value: impl Into<EncryptedValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Secret's key name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Base64 ciphertext
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ascending by key, ties broken by value.
impl Ord for Secret {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for Secret {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

fn non_empty_key<'de, D>(deserializer: D) -> std::result::Result<SecretKey, D::Error>
where
    D: Deserializer<'de>,
{
    let key = SecretKey::deserialize(deserializer)?;
    if key.is_empty() {
        return Err(serde::de::Error::custom("secret key cannot be empty"));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_new() {
        let secret = Secret::new("API_KEY", "Y2lwaGVydGV4dA==");

        assert_eq!(secret.key(), "API_KEY");
        assert_eq!(secret.value(), "Y2lwaGVydGV4dA==");
    }

    #[test]
    fn test_secret_display() {
        let secret = Secret::new("DATABASE_URL", "encrypted_value");

        assert_eq!(format!("{}", secret), "DATABASE_URL");
    }

    #[test]
    fn test_ordering_by_key() {
        assert!(Secret::new("a", "9") < Secret::new("b", "1"));
        assert!(Secret::new("b", "1") > Secret::new("a", "9"));
    }

    #[test]
    fn test_ordering_ties_broken_by_value() {
        assert!(Secret::new("a", "1") < Secret::new("a", "2"));
        assert!(!(Secret::new("a", "2") < Secret::new("a", "1")));
    }

    #[test]
    fn test_ordering_equal_is_not_less() {
        let a = Secret::new("a", "1");
        assert!(!(a < a.clone()));
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }
}
