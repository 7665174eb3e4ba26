//! Table registry: the closed, immutable catalogue of logical tables.
//!
//! The registry is what lets the repository hand back a correctly shaped
//! empty result when the backend returns no rows (a select-all on an empty
//! table carries no column metadata).

pub mod catalogue;

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// What a table is used for in the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRole {
    /// Day-to-day records: jobs, fuel, maintenance, repairs.
    Operational,
    Inventory,
    /// Reference data: drivers, customers, routes, users.
    Master,
    Pricing,
    System,
}

impl TableRole {
    pub fn label(&self) -> &'static str {
        match self {
            TableRole::Operational => "operational",
            TableRole::Inventory => "inventory",
            TableRole::Master => "master",
            TableRole::Pricing => "pricing",
            TableRole::System => "system",
        }
    }
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static declaration of one logical table.
#[derive(Debug, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub role: TableRole,
    /// Columns identifying a row for upserts.
    pub key: &'static [&'static str],
    /// Ordered; order is significant for empty results.
    pub columns: &'static [&'static str],
}

/// Columns whose contents must not be echoed to a terminal by default.
const SENSITIVE_COLUMNS: &[&str] = &["Password"];

impl TableDef {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.to_string()).collect()
    }

    pub fn sensitive_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .copied()
            .filter(|c| SENSITIVE_COLUMNS.contains(c))
            .collect()
    }
}

impl fmt::Display for TableDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Resolve a table name, failing with the programming-error kind.
pub fn lookup(name: &str) -> AppResult<&'static TableDef> {
    catalogue::ALL
        .iter()
        .copied()
        .find(|def| def.name == name)
        .ok_or_else(|| AppError::UnknownTable(name.to_string()))
}

pub fn columns_of(name: &str) -> AppResult<&'static [&'static str]> {
    lookup(name).map(|def| def.columns)
}

/// Every declared table, in declaration order.
pub fn tables() -> impl Iterator<Item = &'static TableDef> {
    catalogue::ALL.iter().copied()
}

pub fn table_names() -> Vec<&'static str> {
    tables().map(|def| def.name).collect()
}

pub fn is_declared(name: &str) -> bool {
    tables().any(|def| def.name == name)
}
