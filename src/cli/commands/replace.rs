use super::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::formats::{DataFormat, csv, json};
use crate::registry;
use crate::ui::messages::success;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Replace {
        table,
        file,
        format,
    } = cmd
    else {
        return Ok(());
    };

    let def = registry::lookup(table)?;
    let format = format
        .or_else(|| DataFormat::from_path(file))
        .ok_or_else(|| AppError::Config(format!("cannot tell the format of {file}; use --format")))?;

    let tabular = match format {
        DataFormat::Json => json::read_json(&fs::read_to_string(file)?, def)?,
        DataFormat::Csv => csv::read_csv(fs::File::open(file)?, def)?,
    };
    let count = tabular.len();

    let mut repo = open_session(cfg)?;
    if !repo.replace(def.name, tabular)? {
        return Err(AppError::WriteRejected {
            table: def.name.to_string(),
        });
    }

    success(format!("Upserted {count} rows into {}", def.name));
    Ok(())
}
