//! Test fixtures and constants.

/// Standard plaintext secrets used across multiple tests.
pub const STANDARD_SECRETS: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/mydb"),
    ("api_key", "sk-test-12345"),
    ("db_password", "hunter2"),
];

/// Valid base64 that no KMS backend produced.
pub const TAMPERED_VALUE: &str = "dGFtcGVyZWQgY2lwaGVydGV4dA==";

/// A secret file that is missing a `value` field.
pub const MISSING_VALUE_YAML: &str = "- key: api_key\n";
