//! The repository: the only data entry point the rest of the app uses.
//!
//! Read paths never fail for a declared table: a backend error or an empty
//! reply both materialise as zero rows carrying the registered columns, so
//! callers can always render headers and add the first row. Write paths
//! report `Ok(false)` on backend failure and leave the cache untouched.
//! Only programming errors (undeclared table names) come back as `Err`.

use crate::backend::{BackendError, SharedBackend};
use crate::core::cache::SessionCache;
use crate::errors::{AppError, AppResult};
use crate::models::{RowPayload, Tabular};
use crate::registry::{self, TableDef};
use tracing::{debug, error, warn};

/// Outcome of [`Repository::load_all`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    pub loaded: Vec<&'static str>,
    /// Tables that fell back to empty-with-schema, with the backend message.
    pub degraded: Vec<(&'static str, String)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }

    pub fn total(&self) -> usize {
        self.loaded.len() + self.degraded.len()
    }
}

/// Cached, schema-aware access to the logical tables of one session.
pub struct Repository {
    backend: SharedBackend,
    cache: SessionCache,
}

impl Repository {
    /// Fresh session over a shared backend.
    pub fn new(backend: SharedBackend) -> Self {
        Self::with_cache(backend, SessionCache::new())
    }

    /// Resume a session with an existing cache.
    pub fn with_cache(backend: SharedBackend, cache: SessionCache) -> Self {
        Self { backend, cache }
    }

    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    /// Session teardown: hand the cache back.
    pub fn into_cache(self) -> SessionCache {
        self.cache
    }

    /// Cached table, fetching it on first use.
    pub fn get(&mut self, table: &str) -> AppResult<&Tabular> {
        let def = registry::lookup(table)?;
        if self.cache.contains(def.name) {
            debug!(table = def.name, "cache hit");
        }
        let backend = &self.backend;
        Ok(self
            .cache
            .get_or_insert_with(def.name, || fetch(backend, def).0))
    }

    /// Force a backend round-trip and replace the cache entry.
    pub fn refetch(&mut self, table: &str) -> AppResult<&Tabular> {
        let def = registry::lookup(table)?;
        let (tabular, _) = fetch(&self.backend, def);
        Ok(self.cache.put(def.name, tabular))
    }

    /// Insert one row, then extend the cached table with it.
    ///
    /// Anything other than a single row (a list, a scalar) is rejected
    /// before the backend is contacted. Server-side defaults are not
    /// reflected in the cache until the next `refetch`.
    pub fn append(&mut self, table: &str, row: impl Into<RowPayload>) -> AppResult<bool> {
        let def = registry::lookup(table)?;
        let row = match row.into() {
            RowPayload::Single(row) => row,
            other => {
                error!(
                    table = def.name,
                    payload = %other.describe(),
                    "append expects a single row; nothing sent"
                );
                return Ok(false);
            }
        };

        if let Err(err) = self.backend.insert(def, &row) {
            error!(table = def.name, error = %err, "insert failed");
            return Ok(false);
        }

        match self.cache.get_mut(def.name) {
            Some(cached) => cached.push(row),
            None => {
                self.cache.put(def.name, Tabular::with_schema(def, vec![row]));
            }
        }
        debug!(table = def.name, "row appended");
        Ok(true)
    }

    /// Upsert every row of `tabular`, then make it the cached value.
    ///
    /// All-or-nothing from the caller's view: per-row status is not reported.
    /// The table must lead with the registered columns (see
    /// [`Tabular::with_schema`]); anything else is refused before the
    /// backend is contacted.
    pub fn replace(&mut self, table: &str, tabular: Tabular) -> AppResult<bool> {
        let def = registry::lookup(table)?;
        if !tabular.follows_schema(def) {
            return Err(AppError::InvalidRowShape(format!(
                "replacement for {} must start with its registered columns, got [{}]",
                def.name,
                tabular.columns().join(", ")
            )));
        }
        if let Err(err) = self.backend.upsert(def, tabular.rows()) {
            error!(table = def.name, rows = tabular.len(), error = %err, "upsert failed");
            return Ok(false);
        }
        debug!(table = def.name, rows = tabular.len(), "table replaced");
        self.cache.put(def.name, tabular);
        Ok(true)
    }

    /// Refetch every declared table independently.
    pub fn load_all(&mut self) -> LoadReport {
        let mut report = LoadReport::default();
        for def in registry::tables() {
            let (tabular, failure) = fetch(&self.backend, def);
            self.cache.put(def.name, tabular);
            match failure {
                None => report.loaded.push(def.name),
                Some(err) => report.degraded.push((def.name, err.message)),
            }
        }
        report
    }

    /// Forget one cached table. Returns whether an entry existed.
    pub fn drop(&mut self, table: &str) -> AppResult<bool> {
        let def = registry::lookup(table)?;
        Ok(self.cache.drop(def.name).is_some())
    }

    pub fn drop_all(&mut self) {
        self.cache.drop_all();
    }
}

/// One select-all, degraded to empty-with-schema on an empty reply or error.
fn fetch(backend: &SharedBackend, def: &'static TableDef) -> (Tabular, Option<BackendError>) {
    match backend.select_all(def) {
        Ok(rows) if rows.is_empty() => {
            debug!(table = def.name, "empty table, using registered columns");
            (Tabular::empty_with_schema(def), None)
        }
        Ok(rows) => {
            debug!(table = def.name, rows = rows.len(), "fetched");
            (Tabular::with_schema(def, rows), None)
        }
        Err(err) => {
            warn!(
                table = def.name,
                backend = backend.name(),
                error = %err,
                "fetch failed, serving empty table"
            );
            (Tabular::empty_with_schema(def), Some(err))
        }
    }
}
