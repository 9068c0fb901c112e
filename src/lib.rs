//! Valise - validate and synchronize KMS-encrypted secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── validate      # Check every value decrypts
//! │   ├── encrypt       # Encrypt a value into a secret file
//! │   ├── sync          # Push secret files to the remote store
//! │   ├── remote        # dump / list / namespaces
//! │   └── output        # Console helpers
//! └── core/             # Core library components
//!     ├── domain/       # Secret, Changes, reports
//!     ├── collection    # List <-> map conversions, canonical order
//!     ├── yaml          # Secret file codec
//!     ├── validation    # Validation engine
//!     ├── sync          # Plan and apply store changes
//!     ├── cipher/       # Kms trait, base64 wire format, backends
//!     ├── store/        # Store trait, filesystem and memory backends
//!     └── config        # valise.toml
//! ```
//!
//! # Example
//!
//! ```
//! use valise::core::domain::{Changes, Secret};
//!
//! let local = vec![Secret::new("a", "MQ=="), Secret::new("b", "Mg==")];
//! let remote = vec![Secret::new("a", "MQ=="), Secret::new("c", "Mw==")];
//!
//! let changes = Changes::compute(&local, &remote);
//! assert_eq!(changes.upserts(), &[&Secret::new("b", "Mg==")]);
//! assert_eq!(changes.stale(), &[&Secret::new("c", "Mw==")]);
//! ```

pub mod cli;
pub mod core;
pub mod error;
