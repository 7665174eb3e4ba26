//! Local SQLite file standing in for the hosted service (offline work, demos,
//! CLI tests). Columns are declared untyped so values keep whatever scalar
//! type the caller sent, as they would on the hosted side.

use super::{Backend, BackendError, BackendResult};
use crate::models::Row;
use crate::registry::{self, TableDef};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, OptionalExtension, params_from_iter};
use serde_json::{Number, Value};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    pub fn open(path: &str) -> rusqlite::Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    /// Create every registered table that does not exist yet.
    pub fn init_schema(&self) -> BackendResult<()> {
        let conn = self.lock()?;
        for def in registry::tables() {
            if table_exists(&conn, def.name)? {
                continue;
            }
            conn.execute_batch(&create_table_sql(def))?;
            tracing::debug!(table = def.name, "created local table");
        }
        Ok(())
    }

    /// Helper to execute a closure against the locked connection.
    pub fn with_conn<F, T>(&self, func: F) -> BackendResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.lock()?;
        Ok(func(&conn)?)
    }

    fn lock(&self) -> BackendResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| BackendError::new("sqlite connection lock poisoned"))
    }

    fn select(&self, table: &TableDef, limit: Option<usize>) -> BackendResult<Vec<Row>> {
        let conn = self.lock()?;
        let mut sql = format!("SELECT * FROM {} ORDER BY rowid", quote(table.name));
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }

        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let rows = stmt.query_map([], |r| {
            let mut row = Row::new();
            for (i, name) in names.iter().enumerate() {
                row.set(name, to_json(r.get_ref(i)?));
            }
            Ok(row)
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

impl Backend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn select_all(&self, table: &TableDef) -> BackendResult<Vec<Row>> {
        self.select(table, None)
    }

    fn select_limit(&self, table: &TableDef, limit: usize) -> BackendResult<Vec<Row>> {
        self.select(table, Some(limit))
    }

    fn insert(&self, table: &TableDef, row: &Row) -> BackendResult<()> {
        let conn = self.lock()?;
        let (sql, values) = insert_sql("INSERT", table, row);
        conn.execute(&sql, params_from_iter(values))?;
        Ok(())
    }

    fn upsert(&self, table: &TableDef, rows: &[Row]) -> BackendResult<()> {
        for row in rows {
            if let Some(missing) = table.key.iter().find(|k| !row.contains(k)) {
                return Err(BackendError::new(format!(
                    "row for {} is missing key column {missing}",
                    table.name
                )));
            }
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for row in rows {
            // OR REPLACE drops the conflicting row first, so the new row
            // replaces it wholesale.
            let (sql, values) = insert_sql("INSERT OR REPLACE", table, row);
            tx.execute(&sql, params_from_iter(values))?;
        }
        tx.commit()?;
        Ok(())
    }

    fn ping(&self) -> BackendResult<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn create_table_sql(def: &TableDef) -> String {
    let columns: Vec<String> = def.columns.iter().map(|c| quote(c)).collect();
    let key: Vec<String> = def.key.iter().map(|c| quote(c)).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({}, PRIMARY KEY ({}));",
        quote(def.name),
        columns.join(", "),
        key.join(", ")
    )
}

fn insert_sql(verb: &str, table: &TableDef, row: &Row) -> (String, Vec<SqlValue>) {
    if row.is_empty() {
        return (
            format!("{verb} INTO {} DEFAULT VALUES", quote(table.name)),
            Vec::new(),
        );
    }

    let columns: Vec<String> = row.columns().map(quote).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let values = row.as_map().values().map(to_sql).collect();

    (
        format!(
            "{verb} INTO {} ({}) VALUES ({})",
            quote(table.name),
            columns.join(", "),
            placeholders.join(", ")
        ),
        values,
    )
}

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        nested => SqlValue::Text(nested.to_string()),
    }
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}
