//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a valise command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - No inherited VALISE_* overrides, colors off
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("valise").expect("failed to find valise binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        for var in [
            "VALISE_CONFIG",
            "VALISE_KMS_BACKEND",
            "VALISE_IDENTITY",
            "VALISE_KMS_KEY_ID",
            "VALISE_STORE",
            "VALISE_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `valise keygen`.
    pub fn keygen(&self) -> Output {
        self.cmd()
            .arg("keygen")
            .output()
            .expect("failed to run valise keygen")
    }

    /// Shortcut for `valise encrypt KEY VALUE --file FILE`.
    pub fn encrypt(&self, key: &str, value: &str, file: &str) -> Output {
        self.cmd()
            .args(["encrypt", key, value, "--file", file])
            .output()
            .expect("failed to run valise encrypt")
    }

    /// Shortcut for `valise validate DIR`.
    pub fn validate(&self, dir: &str) -> Output {
        self.cmd()
            .args(["validate", dir])
            .output()
            .expect("failed to run valise validate")
    }

    /// Shortcut for `valise sync DIR`.
    pub fn sync(&self, dir: &str) -> Output {
        self.cmd()
            .args(["sync", dir])
            .output()
            .expect("failed to run valise sync")
    }

    /// Shortcut for `valise sync DIR --dry-run`.
    pub fn sync_dry_run(&self, dir: &str) -> Output {
        self.cmd()
            .args(["sync", dir, "--dry-run"])
            .output()
            .expect("failed to run valise sync --dry-run")
    }

    /// Shortcut for `valise list NAMESPACE`.
    pub fn list(&self, namespace: &str) -> Output {
        self.cmd()
            .args(["list", namespace])
            .output()
            .expect("failed to run valise list")
    }

    /// Shortcut for `valise namespaces`.
    pub fn namespaces(&self) -> Output {
        self.cmd()
            .arg("namespaces")
            .output()
            .expect("failed to run valise namespaces")
    }

    /// Shortcut for `valise dump NAMESPACE`.
    pub fn dump(&self, namespace: &str) -> Output {
        self.cmd()
            .args(["dump", namespace])
            .output()
            .expect("failed to run valise dump")
    }
}
