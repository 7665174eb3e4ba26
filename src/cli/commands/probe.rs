use crate::backend;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::bootstrap::probe_columns;
use crate::errors::AppResult;
use crate::ui::messages::{detail, info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Probe { table } = cmd else {
        return Ok(());
    };

    let backend = backend::connect(cfg, true)?;
    let probe = probe_columns(backend.as_ref(), table)?;

    if !probe.is_conclusive() {
        info(format!("{} has no rows; live columns unknown.", probe.table));
        return Ok(());
    }

    detail("Live columns", probe.live.join(", "));
    if probe.has_drift() {
        if !probe.missing.is_empty() {
            warning(format!("Declared but not live: {}", probe.missing.join(", ")));
        }
        if !probe.extra.is_empty() {
            warning(format!("Live but not declared: {}", probe.extra.join(", ")));
        }
    } else {
        success(format!("{} matches its declared columns", probe.table));
    }
    Ok(())
}
