//! Backend client adapters.
//!
//! Three verbs cross this boundary (`select_all`, `insert`, `upsert`), plus a
//! one-row select and a reachability check used by the bootstrap helpers.
//! Every failure is reported as a single opaque [`BackendError`]; adapters
//! never retry.

pub mod memory;
pub mod rest;
pub mod sqlite;

use crate::config::{BackendKind, Config};
use crate::config::credentials::Credentials;
use crate::errors::AppResult;
use crate::models::Row;
use crate::registry::TableDef;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use memory::MemoryBackend;
pub use rest::RestBackend;
pub use sqlite::SqliteBackend;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("backend error: {message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for BackendError {
    fn from(err: rusqlite::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<ureq::Error> for BackendError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                Self::new(format!("HTTP {code}: {}", body.trim()))
            }
            ureq::Error::Transport(transport) => Self::new(transport.to_string()),
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Remote tabular service as seen by the repository.
pub trait Backend: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Every row of the table; no filtering, projection or paging.
    fn select_all(&self, table: &TableDef) -> BackendResult<Vec<Row>>;

    /// At most `limit` rows, in backend order.
    fn select_limit(&self, table: &TableDef, limit: usize) -> BackendResult<Vec<Row>>;

    /// Append one row; the backend fills defaults for absent columns.
    fn insert(&self, table: &TableDef, row: &Row) -> BackendResult<()>;

    /// Insert new rows and wholesale-replace rows whose key already exists.
    fn upsert(&self, table: &TableDef, rows: &[Row]) -> BackendResult<()>;

    fn ping(&self) -> BackendResult<()>;
}

/// Process-wide backend handle.
pub type SharedBackend = Arc<dyn Backend>;

/// Build the backend selected by the configuration.
///
/// Credentials are only resolved for the hosted backend; missing ones are a
/// fatal startup error.
pub fn connect(cfg: &Config, allow_compiled_default: bool) -> AppResult<SharedBackend> {
    let backend: SharedBackend = match cfg.backend {
        BackendKind::Supabase => {
            let creds = Credentials::resolve(cfg, allow_compiled_default)?;
            Arc::new(RestBackend::new(
                creds,
                Duration::from_secs(cfg.timeout_secs),
            ))
        }
        BackendKind::Sqlite => {
            let backend = SqliteBackend::open(&cfg.database)?;
            backend.init_schema()?;
            Arc::new(backend)
        }
        BackendKind::Memory => Arc::new(MemoryBackend::untracked()),
    };
    tracing::debug!(backend = backend.name(), "backend ready");
    Ok(backend)
}
