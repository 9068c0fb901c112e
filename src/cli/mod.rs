//! Command-line interface.

pub mod completions;
pub mod encrypt;
pub mod keygen;
pub mod output;
pub mod remote;
pub mod sync;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::error::Result;

/// Valise - validate and synchronize KMS-encrypted secrets.
#[derive(Parser)]
#[command(
    name = "valise",
    about = "Validate and synchronize KMS-encrypted secrets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Flags shared by every command. Each overrides the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to valise.toml
    #[arg(long, global = true, env = "VALISE_CONFIG")]
    pub config: Option<PathBuf>,

    /// KMS backend (age, aws)
    #[arg(long, global = true, env = "VALISE_KMS_BACKEND")]
    pub kms: Option<String>,

    /// Age identity file
    #[arg(long, global = true, env = "VALISE_IDENTITY")]
    pub identity: Option<PathBuf>,

    /// AWS KMS key ID or ARN used for encryption
    #[arg(long, global = true, env = "VALISE_KMS_KEY_ID")]
    pub key_id: Option<String>,

    /// Filesystem store root
    #[arg(long, global = true, env = "VALISE_STORE")]
    pub store: Option<PathBuf>,
}

impl GlobalArgs {
    /// Load the config file and apply flag overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is invalid or an override is.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(backend) = &self.kms {
            config.kms.backend = backend.clone();
        }
        if let Some(identity) = &self.identity {
            config.kms.identity = Some(identity.clone());
        }
        if let Some(key_id) = &self.key_id {
            config.kms.key_id = Some(key_id.clone());
        }
        if let Some(store) = &self.store {
            config.store.path = Some(store.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Check that every secret in a directory decrypts
    Validate {
        /// Directory of secret files (*.yml, *.yaml)
        secretdir: PathBuf,
    },

    /// Encrypt a value and store it in a secret file
    Encrypt {
        /// Secret key
        key: String,
        /// Plaintext value
        value: String,
        /// Secret file to update (created if missing)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Push secret files to the remote store
    Sync {
        /// Directory of secret files (*.yml, *.yaml)
        secretdir: PathBuf,
        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a remote namespace to a secret file
    Dump {
        /// Remote namespace
        namespace: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the keys in a remote namespace
    List {
        /// Remote namespace
        namespace: String,
    },

    /// List remote namespaces
    Namespaces,

    /// Generate an age identity for the age backend
    Keygen {
        /// Where to write the identity (defaults to the configured path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
///
/// # Errors
///
/// Returns the command's error; `main` prints it and exits non-zero.
pub fn execute(command: Command, global: &GlobalArgs) -> Result<()> {
    use Command::*;

    match command {
        Validate { secretdir } => validate::execute(&secretdir, global),
        Encrypt { key, value, file } => encrypt::execute(&key, &value, &file, global),
        Sync { secretdir, dry_run } => sync::execute(&secretdir, dry_run, global),
        Dump { namespace, output } => remote::dump(&namespace, output.as_deref(), global),
        List { namespace } => remote::list(&namespace, global),
        Namespaces => remote::namespaces(global),
        Keygen { output } => keygen::execute(output, global),
        Completions { shell } => completions::execute(shell),
    }
}
