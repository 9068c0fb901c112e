//! Test support utilities for valise integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir and home dir. Child processes get
/// `HOME` and `.current_dir()` pointed at them, so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with an age identity at the default path.
    pub fn with_identity() -> Self {
        let t = Self::new();
        let output = t.keygen();
        assert!(
            output.status.success(),
            "Failed to generate identity: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Path inside the project directory.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Create a secrets directory in the project and return its path.
    pub fn secret_dir(&self) -> PathBuf {
        let dir = self.path("secrets");
        std::fs::create_dir_all(&dir).expect("failed to create secrets dir");
        dir
    }

    /// Write raw contents to a file in the project directory.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, contents).expect("failed to write file");
    }

    /// Read a file in the project directory.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("failed to read file")
    }
}
