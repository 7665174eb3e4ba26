//! fleetdesk library root.
//! Exposes the table registry, the cached repository and its backends, and
//! the CLI dispatcher used by main.rs.

pub mod backend;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod formats;
pub mod models;
pub mod registry;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Tables { .. } => cli::commands::tables::handle(&cli.command),
        Commands::Get { .. } => cli::commands::get::handle(&cli.command, cfg),
        Commands::Append { .. } => cli::commands::append::handle(&cli.command, cfg),
        Commands::Replace { .. } => cli::commands::replace::handle(&cli.command, cfg),
        Commands::LoadAll => cli::commands::load_all::handle(cfg),
        Commands::Probe { .. } => cli::commands::probe::handle(&cli.command, cfg),
        Commands::Ping => cli::commands::ping::handle(cfg),
        Commands::Secrets { .. } => cli::commands::secrets::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once, then apply command-line overrides.
    let mut cfg = Config::load()?;
    if let Some(backend) = cli.backend {
        cfg.backend = backend;
    }
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    utils::logging::init_logging(&cfg.log_filter);
    tracing::debug!(backend = ?cfg.backend, "configuration loaded");

    dispatch(&cli, &cfg)
}
