//! Entry-level comparison of two archives.

use std::collections::BTreeMap;

use crate::wad::Wad3Archive;

/// How a name differs between the reference and the compared archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// Only in the compared archive
    Added,
    /// Only in the reference archive
    Removed,
    /// In both, with different fingerprints
    Modified,
    Unchanged,
}

/// Classification of every name present in either archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveDiff {
    changes: BTreeMap<String, Change>,
}

impl ArchiveDiff {
    pub fn compute(reference: &Wad3Archive, compare: &Wad3Archive) -> Self {
        let mut changes = BTreeMap::new();

        for (name, entry) in reference.entries() {
            let change = match compare.entries().get(name) {
                None => Change::Removed,
                Some(other) if other.fingerprint != entry.fingerprint => Change::Modified,
                Some(_) => Change::Unchanged,
            };
            changes.insert(name.clone(), change);
        }

        for name in compare.entries().keys() {
            if !reference.entries().contains_key(name) {
                changes.insert(name.clone(), Change::Added);
            }
        }

        Self { changes }
    }

    /// All names with their classification, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Change)> {
        self.changes.iter().map(|(name, &change)| (name.as_str(), change))
    }

    pub fn names(&self, change: Change) -> Vec<&str> {
        self.iter()
            .filter(|&(_, c)| c == change)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn count(&self, change: Change) -> usize {
        self.changes.values().filter(|&&c| c == change).count()
    }

    pub fn get(&self, name: &str) -> Option<Change> {
        self.changes.get(&name.to_lowercase()).copied()
    }

    /// Number of names across both archives.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        self.changes.values().any(|&c| c != Change::Unchanged)
    }
}
