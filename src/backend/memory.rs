//! In-process backend. Keeps rows in memory and can be told to fail,
//! globally or per table. [`MemoryBackend::new`] also journals every call
//! for tests; the `memory` backend setting uses [`MemoryBackend::untracked`],
//! which keeps rows only.

use super::{Backend, BackendError, BackendResult};
use crate::models::Row;
use crate::registry::TableDef;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// One call received by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SelectAll(String),
    SelectLimit(String, usize),
    Insert(String, Row),
    Upsert(String, Vec<Row>),
    Ping,
}

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Row>>,
    journal: bool,
    calls: Vec<Call>,
    fail_all: bool,
    failing: HashSet<String>,
}

pub struct MemoryBackend {
    state: Mutex<State>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Store with a call journal (see [`MemoryBackend::calls`]).
    pub fn new() -> Self {
        Self::with_journal(true)
    }

    /// Store without a call journal, for long-running processes.
    pub fn untracked() -> Self {
        Self::with_journal(false)
    }

    fn with_journal(journal: bool) -> Self {
        Self {
            state: Mutex::new(State {
                journal,
                ..State::default()
            }),
        }
    }

    /// Replace the stored rows of a table without recording a call.
    pub fn seed(&self, table: &str, rows: Vec<Row>) {
        if let Ok(mut state) = self.state.lock() {
            state.tables.insert(table.to_string(), rows);
        }
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.state
            .lock()
            .map(|s| s.tables.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Make every call fail (`true`) or succeed again (`false`).
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_all = failing;
        }
    }

    /// Make calls touching one table fail.
    pub fn fail_table(&self, table: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.insert(table.to_string());
        }
    }

    /// Calls received so far; always empty for an untracked store.
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.calls.clear();
        }
    }

    fn lock(&self) -> BackendResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| BackendError::new("memory backend lock poisoned"))
    }

    /// Record the call, then fail if configured to.
    fn enter(&self, call: Call, table: Option<&str>) -> BackendResult<MutexGuard<'_, State>> {
        let mut state = self.lock()?;
        if state.journal {
            state.calls.push(call);
        }
        if state.fail_all {
            return Err(BackendError::new("memory backend unavailable"));
        }
        if let Some(t) = table
            && state.failing.contains(t)
        {
            return Err(BackendError::new(format!("table {t} unavailable")));
        }
        Ok(state)
    }
}

fn same_key(key: &[&str], a: &Row, b: &Row) -> bool {
    key.iter().all(|k| a.get(k) == b.get(k))
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn select_all(&self, table: &TableDef) -> BackendResult<Vec<Row>> {
        let state = self.enter(Call::SelectAll(table.name.to_string()), Some(table.name))?;
        Ok(state.tables.get(table.name).cloned().unwrap_or_default())
    }

    fn select_limit(&self, table: &TableDef, limit: usize) -> BackendResult<Vec<Row>> {
        let state = self.enter(
            Call::SelectLimit(table.name.to_string(), limit),
            Some(table.name),
        )?;
        Ok(state
            .tables
            .get(table.name)
            .map(|rows| rows.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn insert(&self, table: &TableDef, row: &Row) -> BackendResult<()> {
        let mut state = self.enter(
            Call::Insert(table.name.to_string(), row.clone()),
            Some(table.name),
        )?;
        state
            .tables
            .entry(table.name.to_string())
            .or_default()
            .push(row.clone());
        Ok(())
    }

    fn upsert(&self, table: &TableDef, rows: &[Row]) -> BackendResult<()> {
        let mut state = self.enter(
            Call::Upsert(table.name.to_string(), rows.to_vec()),
            Some(table.name),
        )?;
        let stored = state.tables.entry(table.name.to_string()).or_default();
        for row in rows {
            match stored.iter_mut().find(|r| same_key(table.key, r, row)) {
                Some(existing) => *existing = row.clone(),
                None => stored.push(row.clone()),
            }
        }
        Ok(())
    }

    fn ping(&self) -> BackendResult<()> {
        self.enter(Call::Ping, None).map(|_| ())
    }
}
