//! Unified application error type.
//! Registry, repository, backends and CLI all return AppError so that the
//! binary has a single place to report failures.

use crate::backend::BackendError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Programming errors
    // ---------------------------
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Invalid row payload: {0}")]
    InvalidRowShape(String),

    // ---------------------------
    // Backend
    // ---------------------------
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Write to {table} was rejected by the backend")]
    WriteRejected { table: String },

    // ---------------------------
    // Config / credentials
    // ---------------------------
    #[error("Missing credentials: no value for {0} in secrets, environment or build defaults")]
    MissingCredentials(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // IO and encodings
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for the error kinds that indicate a caller bug rather than an
    /// environmental failure.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::UnknownTable(_) | Self::InvalidRowShape(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
