//! One-shot helpers that sit outside the data path: reachability check,
//! column drift probe and secrets-file materialisation.

use crate::backend::{Backend, BackendResult};
use crate::config::credentials::SupabaseSecrets;
use crate::errors::{AppError, AppResult};
use crate::registry;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub fn ping(backend: &dyn Backend) -> BackendResult<()> {
    backend.ping()
}

/// Live columns of one table compared with the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProbe {
    pub table: &'static str,
    /// Columns the backend returned, in reply order. Empty when the table has no rows.
    pub live: Vec<String>,
    /// Registered but absent from the live row.
    pub missing: Vec<&'static str>,
    /// Present in the live row but not registered.
    pub extra: Vec<String>,
}

impl ColumnProbe {
    /// An empty table gives no evidence either way.
    pub fn is_conclusive(&self) -> bool {
        !self.live.is_empty()
    }

    pub fn has_drift(&self) -> bool {
        self.is_conclusive() && (!self.missing.is_empty() || !self.extra.is_empty())
    }
}

/// Select one row and report which columns it actually carries.
pub fn probe_columns(backend: &dyn Backend, table: &str) -> AppResult<ColumnProbe> {
    let def = registry::lookup(table)?;
    let rows = backend.select_limit(def, 1)?;

    let Some(first) = rows.first() else {
        return Ok(ColumnProbe {
            table: def.name,
            live: Vec::new(),
            missing: Vec::new(),
            extra: Vec::new(),
        });
    };

    let live: Vec<String> = first.columns().map(str::to_string).collect();
    let missing = def
        .columns
        .iter()
        .copied()
        .filter(|c| !first.contains(c))
        .collect();
    let extra = live.iter().filter(|c| !def.has_column(c)).cloned().collect();

    Ok(ColumnProbe {
        table: def.name,
        live,
        missing,
        extra,
    })
}

#[derive(Serialize)]
struct MaterialisedSecrets<'a> {
    supabase: SupabaseSecrets,
    service_account: &'a Map<String, Value>,
}

/// URL of a hosted project from its reference id.
pub fn resource_url(resource_id: &str) -> AppResult<String> {
    let id = resource_id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(AppError::Config(format!(
            "invalid resource id '{resource_id}'"
        )));
    }
    Ok(format!("https://{}.supabase.co", id.to_ascii_lowercase()))
}

/// Write a secrets file holding the service-account fields verbatim plus
/// the URL derived from `resource_id`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn materialize_secrets(
    service_account: &Value,
    resource_id: &str,
    out: &Path,
    force: bool,
) -> AppResult<PathBuf> {
    let Value::Object(fields) = service_account else {
        return Err(AppError::Config(
            "service-account document must be a JSON object".to_string(),
        ));
    };

    if out.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists (use --force to overwrite)",
            out.display()
        )));
    }

    let doc = MaterialisedSecrets {
        supabase: SupabaseSecrets {
            url: Some(resource_url(resource_id)?),
            key: None,
        },
        service_account: fields,
    };

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, serde_yaml::to_string(&doc)?)?;
    Ok(out.to_path_buf())
}

/// Read a service-account JSON document from disk.
pub fn read_service_account(path: &Path) -> AppResult<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
