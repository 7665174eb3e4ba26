use super::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::registry;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Append { table, row } = cmd else {
        return Ok(());
    };

    let def = registry::lookup(table)?;
    let payload: serde_json::Value = serde_json::from_str(row)?;

    let mut repo = open_session(cfg)?;
    if !repo.append(def.name, payload)? {
        return Err(AppError::WriteRejected {
            table: def.name.to_string(),
        });
    }

    let rows = repo.cache().get(def.name).map(|t| t.len()).unwrap_or(0);
    success(format!("Row added to {} ({rows} rows in session)", def.name));
    Ok(())
}
