use crate::errors::AppResult;
use crate::models::{Row, Tabular};
use crate::registry::TableDef;
use ::csv::{Reader, Writer};
use serde_json::Value;
use std::io::{Read, Write};

/// Write the table in column order, header first.
pub fn write_csv<W: Write>(out: W, tabular: &Tabular) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record(tabular.columns())?;
    for row in tabular.rows() {
        wtr.write_record(tabular.columns().iter().map(|c| row.text(c)))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Read a header row plus records into a table shaped by the registry.
/// Empty cells become null; everything else stays text and is coerced by
/// the backend. Header order does not matter.
pub fn read_csv<R: Read>(input: R, def: &TableDef) -> AppResult<Tabular> {
    let mut rdr = Reader::from_reader(input);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (h.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(Tabular::with_schema(def, rows))
}
