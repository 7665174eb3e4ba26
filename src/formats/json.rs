use crate::errors::{AppError, AppResult};
use crate::models::{Row, RowPayload, Tabular};
use crate::registry::TableDef;
use std::io::Write;

/// Rows as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut out: W, tabular: &Tabular) -> AppResult<()> {
    let json = serde_json::to_string_pretty(tabular.rows())?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Parse a JSON array of objects into a table shaped by the registry.
pub fn read_json(text: &str, def: &TableDef) -> AppResult<Tabular> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let rows: Vec<Row> = match RowPayload::from(value) {
        RowPayload::Many(rows) => rows,
        other => {
            return Err(AppError::InvalidRowShape(format!(
                "expected a JSON array of objects, got {}",
                other.describe()
            )));
        }
    };
    Ok(Tabular::with_schema(def, rows))
}
