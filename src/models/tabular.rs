use crate::models::row::Row;
use crate::registry::TableDef;
use serde::Serialize;

/// Zero or more rows sharing an ordered column set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tabular {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Tabular {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut tabular = Self {
            columns,
            rows: Vec::new(),
        };
        for row in rows {
            tabular.push(row);
        }
        tabular
    }

    /// Zero rows, registered columns.
    pub fn empty_with_schema(def: &TableDef) -> Self {
        Self {
            columns: def.column_names(),
            rows: Vec::new(),
        }
    }

    /// Registered columns first, then any extra columns the rows carry.
    pub fn with_schema(def: &TableDef, rows: Vec<Row>) -> Self {
        Self::new(def.column_names(), rows)
    }

    /// Append a row, widening the column set with keys not seen before.
    pub fn push(&mut self, row: Row) {
        for column in row.columns() {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push(column.to_string());
            }
        }
        self.rows.push(row);
    }

    /// True when the columns start with `def`'s registered columns, in order.
    pub fn follows_schema(&self, def: &TableDef) -> bool {
        self.columns.len() >= def.columns.len()
            && self
                .columns
                .iter()
                .zip(def.columns)
                .all(|(have, want)| have == want)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Copy with non-empty values of `columns` replaced by a fixed mask.
    pub fn masked(&self, columns: &[&str]) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                for column in columns {
                    if !row.text(column).is_empty() {
                        row.set(column, "********");
                    }
                }
                row
            })
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Values of one column in row order, as display text.
    pub fn column_text(&self, column: &str) -> Vec<String> {
        self.rows.iter().map(|r| r.text(column)).collect()
    }
}
