//! Sync command - push secret files to the remote store.

use std::path::Path;

use tracing::info;

use crate::cli::{output, GlobalArgs};
use crate::core::store::Filesystem;
use crate::core::sync;
use crate::error::Result;

/// Sync every secret file in `dir` to its namespace.
pub fn execute(dir: &Path, dry_run: bool, global: &GlobalArgs) -> Result<()> {
    info!(dir = %dir.display(), dry_run, "running sync");

    let config = global.config()?;
    let store = Filesystem::new(config.store_path()?);

    let reports = sync::sync_dir(&store, dir, dry_run)?;

    let mut changed = 0;
    for report in &reports {
        if report.is_noop() {
            output::dimmed(&format!("{}: up to date", report.namespace));
            continue;
        }
        changed += 1;
        output::file(&report.namespace);
        for key in &report.deleted {
            output::removed(key);
        }
        for key in &report.upserted {
            output::added(key);
        }
    }

    if dry_run {
        if changed > 0 {
            output::warn(&format!("dry run: {} namespace(s) would change", changed));
        } else {
            output::success("already in sync");
        }
    } else if changed > 0 {
        output::success(&format!("synced {} namespace(s)", changed));
    } else {
        output::success("already in sync");
    }

    Ok(())
}
