//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured in terminal cells (`unicode-width`), so Thai text
//! with combining marks lines up with ASCII columns.

use crate::models::Tabular;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Longest cell shown before truncation.
pub const MAX_CELL_WIDTH: usize = 28;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Columns sized to fit headers and cells, capped at [`MAX_CELL_WIDTH`].
    pub fn from_tabular(tabular: &Tabular) -> Self {
        let columns = tabular
            .columns()
            .iter()
            .map(|name| {
                let widest = tabular
                    .rows()
                    .iter()
                    .map(|r| r.text(name).width())
                    .max()
                    .unwrap_or(0);
                Column {
                    header: name.clone(),
                    width: widest.max(name.width()).min(MAX_CELL_WIDTH),
                }
            })
            .collect();

        let mut table = Self::new(columns);
        for row in tabular.rows() {
            table.add_row(tabular.columns().iter().map(|c| row.text(c)).collect());
        }
        table
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

/// Truncate to `width` cells (with an ellipsis) and pad with spaces.
pub fn pad(text: &str, width: usize) -> String {
    let text = text.replace(['\n', '\r'], " ");
    let mut shown = String::new();
    let mut used = 0;

    if text.width() > width {
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            shown.push(ch);
            used += w;
        }
        shown.push('…');
        used += 1;
    } else {
        shown = text;
        used = shown.width();
    }

    shown.push_str(&" ".repeat(width.saturating_sub(used)));
    shown
}
