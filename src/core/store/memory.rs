//! In-memory store, used by tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{validate_namespace, Store};
use crate::core::collection;
use crate::core::domain::Secret;
use crate::core::types::{EncryptedValue, Namespace, SecretKey};
use crate::error::Result;

/// Store backed by nested `BTreeMap`s.
#[derive(Debug, Default)]
pub struct Memory {
    namespaces: RefCell<BTreeMap<Namespace, BTreeMap<SecretKey, EncryptedValue>>>,
}

impl Memory {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for Memory {
    fn list(&self, namespace: &str) -> Result<Vec<Secret>> {
        validate_namespace(namespace)?;
        let namespaces = self.namespaces.borrow();
        Ok(namespaces
            .get(namespace)
            .map(|m| collection::from_map(m.clone()))
            .unwrap_or_default())
    }

    fn put(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        validate_namespace(namespace)?;
        self.namespaces
            .borrow_mut()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<()> {
        validate_namespace(namespace)?;
        let mut namespaces = self.namespaces.borrow_mut();
        if let Some(secrets) = namespaces.get_mut(namespace) {
            secrets.remove(key);
            if secrets.is_empty() {
                namespaces.remove(namespace);
            }
        }
        Ok(())
    }

    fn namespaces(&self) -> Result<Vec<Namespace>> {
        Ok(self.namespaces.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_put_list_delete() {
        let store = Memory::new();
        store.put("app", "b", "2").unwrap();
        store.put("app", "a", "1").unwrap();

        assert_eq!(
            store.list("app").unwrap(),
            vec![Secret::new("a", "1"), Secret::new("b", "2")]
        );

        store.delete("app", "a").unwrap();
        store.delete("app", "b").unwrap();
        assert!(store.namespaces().unwrap().is_empty());
    }
}
