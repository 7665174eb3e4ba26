use crate::config::BackendKind;
use crate::formats::DataFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for fleetdesk
#[derive(Parser)]
#[command(
    name = "fleetdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Fleet back-office data access: jobs, drivers, vehicles, fuel and maintenance tables",
    long_about = None
)]
pub struct Cli {
    /// Override the configured backend
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<BackendKind>,

    /// Override the SQLite file used by the sqlite backend
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the configuration file (and the local schema for sqlite)
    Init,

    /// Show or check the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Report keys missing from the configuration file")]
        check: bool,
    },

    /// List the declared tables
    Tables {
        #[arg(long = "columns", help = "Also print each table's columns")]
        columns: bool,
    },

    /// Fetch a table and print it
    Get {
        /// Table name, e.g. Jobs_Main
        table: String,

        /// Output format; defaults to an aligned terminal table
        #[arg(long, value_enum)]
        format: Option<DataFormat>,

        /// Write to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,

        /// Overwrite --out without asking
        #[arg(long, short = 'f')]
        force: bool,

        /// Print credential columns (e.g. Password) unmasked
        #[arg(long = "show-secrets")]
        show_secrets: bool,
    },

    /// Insert one row into a table
    Append {
        table: String,

        /// Row as a JSON object, e.g. '{"Log_ID":"F1","Liters":50}'
        #[arg(long, value_name = "JSON")]
        row: String,
    },

    /// Upsert every row of a file into a table
    Replace {
        table: String,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Input format; guessed from the extension when omitted
        #[arg(long, value_enum)]
        format: Option<DataFormat>,
    },

    /// Fetch every declared table and report which ones degraded
    LoadAll,

    /// Compare a table's live columns with the declared ones
    Probe { table: String },

    /// Check that the backend is reachable
    Ping,

    /// Build a secrets file from a service-account document
    Secrets {
        #[arg(long = "service-account", value_name = "FILE")]
        service_account: String,

        /// Hosted project reference id
        #[arg(long, value_name = "ID")]
        resource: String,

        /// Destination; defaults to the configured secrets file
        #[arg(long, value_name = "FILE")]
        out: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
