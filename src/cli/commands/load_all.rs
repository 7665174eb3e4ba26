use super::open_session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::table::pad;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut repo = open_session(cfg)?;
    let report = repo.load_all();

    for name in &report.loaded {
        let rows = repo.cache().get(name).map(|t| t.len()).unwrap_or(0);
        println!("{}{}{RESET} {rows} rows", color_for_status(true), pad(name, 18));
    }
    for (name, message) in &report.degraded {
        println!(
            "{}{}{RESET} empty (fetch failed: {message})",
            color_for_status(false),
            pad(name, 18)
        );
    }

    if report.is_clean() {
        success(format!("Loaded {} tables", report.total()));
    } else {
        warning(format!(
            "{} of {} tables served empty after a backend failure",
            report.degraded.len(),
            report.total()
        ));
    }
    Ok(())
}
