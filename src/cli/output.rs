//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR, and plain when not a terminal):
//! - Green: success, checkmarks, additions
//! - Red: errors, invalid keys, removals
//! - Yellow: warnings
//! - Cyan: paths, keys, hints
//! - Dimmed: secondary info

use std::fmt::Display;

use console::style;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ all secrets are valid`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ some secrets are invalid`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red().for_stderr(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: valise keygen`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan().for_stderr(), style(msg).cyan().for_stderr());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a file being processed.
pub fn file(path: impl Display) {
    if colors_enabled() {
        println!("{}", style(path).cyan());
    } else {
        println!("{}", path);
    }
}

/// Print one invalid key under the current file (red).
///
/// Example: `  ✗ db_password: value cannot be decrypted, re-run valise encrypt`
pub fn invalid_key(key: &str, reason: &str) {
    if colors_enabled() {
        println!("  {} {} {}", style("✗").red(), style(key).red().bold(), style(reason).dim());
    } else {
        println!("  ✗ {} {}", key, reason);
    }
}

/// Print a key that will be written (`+ key`).
pub fn added(key: &str) {
    if colors_enabled() {
        println!("  {} {}", style("+").green(), key);
    } else {
        println!("  + {}", key);
    }
}

/// Print a key that will be removed (`- key`).
pub fn removed(key: &str) {
    if colors_enabled() {
        println!("  {} {}", style("-").red(), key);
    } else {
        println!("  - {}", key);
    }
}

/// Print a list item with bullet.
///
/// Example: `  • DATABASE_URL`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a dimmed/secondary message.
///
/// Example: `no secrets stored`
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}
