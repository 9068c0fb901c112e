//! Diff type.
//!
//! Represents the difference between a source secret collection (usually
//! the local declaration) and a destination collection (usually the remote
//! state).

use crate::core::collection;
use crate::core::domain::Secret;

/// The two result sets of a comparison.
///
/// `added` is the upsert set: every source entry that is missing from the
/// destination or holds a different value there. `deleted` is the stale set:
/// every destination entry that is missing from the source or holds a
/// different value there. A key whose value changed therefore appears in
/// both. Entries borrow from the compared collections and keep their input
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changes<'a> {
    added: Vec<&'a Secret>,
    deleted: Vec<&'a Secret>,
}

impl<'a> Changes<'a> {
    /// Compare `src` against `dst`.
    ///
    /// Builds a key map for each side and does one lookup per entry, so the
    /// cost is linear in the combined length. Duplicate keys within one side
    /// resolve last-write-wins, as in [`collection::to_map`].
    pub fn compute(src: &'a [Secret], dst: &'a [Secret]) -> Self {
        let src_map = collection::to_map_ref(src);
        let dst_map = collection::to_map_ref(dst);

        let added = src
            .iter()
            .filter(|s| dst_map.get(s.key()) != Some(&s.value()))
            .collect();

        let deleted = dst
            .iter()
            .filter(|s| src_map.get(s.key()) != Some(&s.value()))
            .collect();

        Self { added, deleted }
    }

    /// Source entries to write to the destination (upsert set).
    pub fn added(&self) -> &[&'a Secret] {
        &self.added
    }

    /// Destination entries that are stale relative to the source.
    pub fn deleted(&self) -> &[&'a Secret] {
        &self.deleted
    }

    /// Alias for [`Changes::added`].
    pub fn upserts(&self) -> &[&'a Secret] {
        self.added()
    }

    /// Alias for [`Changes::deleted`].
    pub fn stale(&self) -> &[&'a Secret] {
        self.deleted()
    }

    /// Stale entries whose key is not rewritten by an upsert.
    ///
    /// These are the keys a sync must actually remove.
    pub fn removals(&self) -> Vec<&'a Secret> {
        let upserted: std::collections::HashSet<&str> =
            self.added.iter().map(|s| s.key()).collect();
        self.deleted
            .iter()
            .copied()
            .filter(|s| !upserted.contains(s.key()))
            .collect()
    }

    /// Whether both sides already agree.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}
