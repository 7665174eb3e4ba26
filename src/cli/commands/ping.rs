use crate::backend;
use crate::config::Config;
use crate::core::bootstrap;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let backend = backend::connect(cfg, true)?;
    bootstrap::ping(backend.as_ref())?;
    success(format!("{} backend is reachable", backend.name()));
    Ok(())
}
