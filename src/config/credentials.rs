//! Backend URL and access key.
//!
//! Each field is resolved on its own, highest priority first:
//! 1. the secrets store (`supabase.url` / `supabase.key`),
//! 2. the `SUPABASE_URL` / `SUPABASE_KEY` environment variables,
//! 3. a default compiled into the binary, only when the caller allows it.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_KEY: &str = "SUPABASE_KEY";

const BUILD_DEFAULT_URL: Option<&str> = option_env!("FLEETDESK_DEFAULT_SUPABASE_URL");
const BUILD_DEFAULT_KEY: Option<&str> = option_env!("FLEETDESK_DEFAULT_SUPABASE_KEY");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupabaseSecrets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// The part of the secrets file the backend cares about; other sections
/// (e.g. `service_account`) are ignored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub supabase: SupabaseSecrets,
}

impl Secrets {
    /// A missing file is an empty store, not an error.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("cannot parse secrets {}: {e}", path.display()))
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn resolve(cfg: &Config, allow_compiled_default: bool) -> AppResult<Self> {
        let secrets = Secrets::load(Path::new(&cfg.secrets_file))?;
        Self::resolve_with(
            &secrets,
            |name| std::env::var(name).ok(),
            allow_compiled_default,
        )
    }

    pub fn resolve_with<F>(secrets: &Secrets, env: F, allow_compiled_default: bool) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = pick(
            secrets.supabase.url.clone(),
            env(ENV_URL),
            allow_compiled_default.then_some(BUILD_DEFAULT_URL).flatten(),
        )
        .ok_or(AppError::MissingCredentials("supabase.url"))?;

        let key = pick(
            secrets.supabase.key.clone(),
            env(ENV_KEY),
            allow_compiled_default.then_some(BUILD_DEFAULT_KEY).flatten(),
        )
        .ok_or(AppError::MissingCredentials("supabase.key"))?;

        Ok(Self { url, key })
    }
}

fn pick(secret: Option<String>, env: Option<String>, built_in: Option<&str>) -> Option<String> {
    secret
        .filter(|v| !v.trim().is_empty())
        .or_else(|| env.filter(|v| !v.trim().is_empty()))
        .or_else(|| built_in.map(str::to_string))
        .map(|v| v.trim().to_string())
}
