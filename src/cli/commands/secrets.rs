use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::bootstrap::{materialize_secrets, read_service_account};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Secrets {
        service_account,
        resource,
        out,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let doc = read_service_account(Path::new(service_account))?;
    let target = out.as_deref().unwrap_or(&cfg.secrets_file);
    let written = materialize_secrets(&doc, resource, Path::new(target), *force)?;

    success(format!("Secrets written to {}", written.display()));
    info("Add supabase.key to that file or export SUPABASE_KEY before connecting.");
    Ok(())
}
