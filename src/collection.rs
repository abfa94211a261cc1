use crate::catalog::EntityCatalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owned counts keyed by entity id. An id with count 0 (or absent) has never
/// been obtained; anything else is owned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    owned: BTreeMap<String, u32>,
    /// Ids obtained for the first time since the last outcome screen.
    newly_acquired: Vec<String>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(owned: BTreeMap<String, u32>, newly_acquired: Vec<String>) -> Self {
        Self {
            owned,
            newly_acquired,
        }
    }

    /// Adds one copy. Returns true when this is the first copy.
    pub fn add(&mut self, id: &str) -> bool {
        let count = self.owned.entry(id.to_string()).or_insert(0);
        *count += 1;
        let is_new = *count == 1;
        if is_new {
            self.newly_acquired.push(id.to_string());
        }
        is_new
    }

    pub fn count(&self, id: &str) -> u32 {
        self.owned.get(id).copied().unwrap_or(0)
    }

    pub fn owns(&self, id: &str) -> bool {
        self.count(id) > 0
    }

    pub fn unique_count(&self) -> usize {
        self.owned.values().filter(|&&count| count > 0).count()
    }

    /// Copies including duplicates.
    pub fn total_count(&self) -> u64 {
        self.owned.values().map(|&count| u64::from(count)).sum()
    }

    pub fn counts(&self) -> &BTreeMap<String, u32> {
        &self.owned
    }

    pub fn newly_acquired(&self) -> &[String] {
        &self.newly_acquired
    }

    pub fn is_newly_acquired(&self, id: &str) -> bool {
        self.newly_acquired.iter().any(|new_id| new_id == id)
    }

    pub fn clear_newly_acquired(&mut self) {
        self.newly_acquired.clear();
    }

    pub fn reset(&mut self) {
        self.owned.clear();
        self.newly_acquired.clear();
    }

    /// (owned, total) over the entities of `catalog`.
    pub fn completion(&self, catalog: &EntityCatalog) -> (usize, usize) {
        let owned = catalog.iter().filter(|entity| self.owns(&entity.id)).count();
        (owned, catalog.len())
    }
}
