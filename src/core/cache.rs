//! Per-session memo of materialised tables.
//!
//! One entry per logical table, no eviction: entries live until dropped or
//! until the owning session goes away. Not shared between sessions.

use crate::models::Tabular;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

#[derive(Debug, Default, Clone)]
pub struct SessionCache {
    entries: HashMap<&'static str, Tabular>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table: &str) -> Option<&Tabular> {
        self.entries.get(table)
    }

    pub(crate) fn get_mut(&mut self, table: &str) -> Option<&mut Tabular> {
        self.entries.get_mut(table)
    }

    pub(crate) fn get_or_insert_with<F>(&mut self, table: &'static str, fetch: F) -> &Tabular
    where
        F: FnOnce() -> Tabular,
    {
        self.entries.entry(table).or_insert_with(fetch)
    }

    /// Store (or overwrite) the entry for `table`.
    pub fn put(&mut self, table: &'static str, tabular: Tabular) -> &Tabular {
        match self.entries.entry(table) {
            Entry::Occupied(mut slot) => {
                slot.insert(tabular);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(tabular),
        }
    }

    pub fn drop(&mut self, table: &str) -> Option<Tabular> {
        self.entries.remove(table)
    }

    pub fn drop_all(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, table: &str) -> bool {
        self.entries.contains_key(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached table names, sorted.
    pub fn tables(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
