//! Remote store commands: dump, list, namespaces.

use std::path::Path;

use tracing::info;

use crate::cli::{output, GlobalArgs};
use crate::core::collection;
use crate::core::store::{Filesystem, Store};
use crate::core::sync;
use crate::core::yaml;
use crate::error::Result;

fn open(global: &GlobalArgs) -> Result<Filesystem> {
    let config = global.config()?;
    Ok(Filesystem::new(config.store_path()?))
}

/// Write a namespace to a secret file, or print it as YAML.
pub fn dump(namespace: &str, out: Option<&Path>, global: &GlobalArgs) -> Result<()> {
    info!(namespace, "running dump");
    let store = open(global)?;

    match out {
        Some(path) => {
            let count = sync::dump(&store, namespace, path)?;
            output::success(&format!(
                "dumped {} secret{} to {}",
                count,
                if count == 1 { "" } else { "s" },
                path.display()
            ));
        }
        None => {
            let secrets = collection::canonical(store.list(namespace)?);
            print!("{}", yaml::to_string(&secrets)?);
        }
    }

    Ok(())
}

/// List the keys of a namespace.
pub fn list(namespace: &str, global: &GlobalArgs) -> Result<()> {
    let store = open(global)?;
    let secrets = store.list(namespace)?;

    if secrets.is_empty() {
        output::dimmed("no secrets stored");
        return Ok(());
    }

    for secret in collection::canonical(secrets) {
        output::list_item(secret.key());
    }
    Ok(())
}

/// List namespaces in the store.
pub fn namespaces(global: &GlobalArgs) -> Result<()> {
    let store = open(global)?;
    let names = store.namespaces()?;

    if names.is_empty() {
        output::dimmed("no namespaces");
        return Ok(());
    }

    for name in names {
        output::list_item(&name);
    }
    Ok(())
}
