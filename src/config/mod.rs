use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod credentials;

/// Which backend the repository talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted tabular service (production)
    Supabase,
    /// Local SQLite file
    Sqlite,
    /// In-process store, lost on exit
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_secrets_file")]
    pub secrets_file: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

/// Keys every config file is expected to carry.
const CONFIG_KEYS: &[&str] = &[
    "backend",
    "database",
    "secrets_file",
    "timeout_secs",
    "log_filter",
];

fn default_backend() -> BackendKind {
    BackendKind::Supabase
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_secrets_file() -> String {
    Config::secrets_path().to_string_lossy().to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database: default_database(),
            secrets_file: default_secrets_file(),
            timeout_secs: default_timeout_secs(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Configuration directory: `$FLEETDESK_HOME`, else the platform config dir.
    pub fn config_dir() -> PathBuf {
        if let Ok(home) = env::var("FLEETDESK_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }
        dirs::config_dir()
            .map(|d| d.join("fleetdesk"))
            .unwrap_or_else(|| PathBuf::from(".fleetdesk"))
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("fleetdesk.yml")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("fleetdesk.sqlite")
    }

    pub fn secrets_path() -> PathBuf {
        Self::config_dir().join("secrets.yml")
    }

    /// Load the configuration file, or defaults if there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("cannot parse {}: {e}", path.display()))
        })
    }

    /// Keys absent from the file on disk (served from defaults at load time).
    pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Ok(CONFIG_KEYS.to_vec());
        }
        let content = fs::read_to_string(path)?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let Some(map) = yaml.as_mapping() else {
            return Ok(CONFIG_KEYS.to_vec());
        };
        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .collect())
    }

    /// Write a fresh configuration file. Returns the path written.
    pub fn init_all(backend: BackendKind, database: Option<String>) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB path: user provided (relative to the config dir) or default
        let database = match database {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    name
                } else {
                    dir.join(p).to_string_lossy().to_string()
                }
            }
            None => default_database(),
        };

        let config = Config {
            backend,
            database,
            ..Config::default()
        };

        let path = Self::config_file();
        let yaml = serde_yaml::to_string(&config)?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(path)
    }
}
