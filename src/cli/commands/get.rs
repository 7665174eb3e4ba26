use super::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::formats::fs_utils::ensure_writable;
use crate::formats::{DataFormat, csv, json};
use crate::models::Tabular;
use crate::registry;
use crate::ui::messages::{header, info, success};
use crate::utils::table::Table;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Get {
        table,
        format,
        out,
        force,
        show_secrets,
    } = cmd
    else {
        return Ok(());
    };

    // Unknown names fail here, before any backend is opened.
    let def = registry::lookup(table)?;
    let mut repo = open_session(cfg)?;
    let fetched = repo.get(def.name)?;

    let shown = if *show_secrets {
        fetched.clone()
    } else {
        fetched.masked(&def.sensitive_columns())
    };

    match out {
        Some(path) => {
            let path = Path::new(path);
            ensure_writable(path, *force)?;
            let file = File::create(path)?;
            let format = format
                .or_else(|| DataFormat::from_path(&path.to_string_lossy()))
                .unwrap_or(DataFormat::Csv);
            write(file, &shown, format)?;
            success(format!(
                "{} rows of {} written to {}",
                shown.len(),
                def.name,
                path.display()
            ));
        }
        None => match format {
            Some(format) => write(io::stdout().lock(), &shown, *format)?,
            None => print_table(def.name, &shown),
        },
    }

    Ok(())
}

fn write<W: Write>(out: W, tabular: &Tabular, format: DataFormat) -> AppResult<()> {
    match format {
        DataFormat::Json => json::write_json(out, tabular),
        DataFormat::Csv => csv::write_csv(out, tabular),
    }
}

fn print_table(name: &str, tabular: &Tabular) {
    header(format!("{name} ({} rows)", tabular.len()));
    print!("{}", Table::from_tabular(tabular).render());
    if tabular.is_empty() {
        info("No rows.");
    }
}
