use crate::backend::SqliteBackend;
use crate::cli::parser::Cli;
use crate::config::{BackendKind, Config};
use crate::errors::AppResult;
use crate::registry;
use crate::ui::messages::{detail, info, success};

/// Handle the `init` command
///
/// Writes the configuration file and, for the sqlite backend, creates every
/// declared table in the local database.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let backend = cli.backend.unwrap_or(cfg.backend);
    let path = Config::init_all(backend, cli.db.clone())?;
    let cfg = Config::load_from(&path)?;

    info("Initializing fleetdesk…");
    detail("Config file", path.display());
    detail("Backend", format!("{backend:?}").to_lowercase());

    if backend == BackendKind::Sqlite {
        let db = SqliteBackend::open(&cfg.database)?;
        db.init_schema()?;
        detail("Database", &cfg.database);
        success(format!(
            "Local schema ready ({} tables)",
            registry::table_names().len()
        ));
    }

    if backend == BackendKind::Supabase {
        detail("Secrets file", &cfg.secrets_file);
        info("Set supabase.url / supabase.key there, or SUPABASE_URL / SUPABASE_KEY.");
    }

    success("fleetdesk initialization completed!");
    Ok(())
}
