//! Valise - validate and synchronize KMS-encrypted secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use valise::cli::output;
use valise::cli::{execute, Cli};
use valise::core::constants;
use valise::error::{CipherError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("valise=debug")
        } else {
            EnvFilter::new("valise=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, &cli.global) {
        let suggestion = match &e {
            Error::Cipher(CipherError::NoIdentity(_)) => Some("run: valise keygen"),
            Error::Validation(_) => Some("re-encrypt invalid values with: valise encrypt"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
