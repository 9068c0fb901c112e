//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret key name (e.g., `db_password`).
pub type SecretKey = String;

/// A base64-encoded ciphertext produced by the KMS backend.
pub type EncryptedValue = String;

/// A remote store namespace. Derived from the secret file stem when syncing.
pub type Namespace = String;

/// Key-to-ciphertext mapping.
pub type SecretMap = std::collections::HashMap<SecretKey, EncryptedValue>;
