//! Hosted tabular service reached over its REST interface.

use super::{Backend, BackendResult};
use crate::config::credentials::Credentials;
use crate::models::Row;
use crate::registry::TableDef;
use std::time::Duration;
use ureq::{Agent, Request};

pub struct RestBackend {
    base_url: String,
    key: String,
    http: Agent,
}

impl RestBackend {
    pub fn new(creds: Credentials, timeout: Duration) -> Self {
        let http = ureq::AgentBuilder::new()
            .timeout_read(timeout)
            .timeout_write(timeout)
            .timeout_connect(timeout)
            .build();
        Self {
            base_url: creds.url.trim_end_matches('/').to_string(),
            key: creds.key,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &TableDef) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name)
    }

    fn request(&self, method: &str, url: &str) -> Request {
        self.http
            .request(method, url)
            .set("apikey", &self.key)
            .set("Authorization", &format!("Bearer {}", self.key))
            .set("Accept", "application/json")
    }
}

impl Backend for RestBackend {
    fn name(&self) -> &'static str {
        "supabase"
    }

    fn select_all(&self, table: &TableDef) -> BackendResult<Vec<Row>> {
        let rows: Vec<Row> = self
            .request("GET", &self.table_url(table))
            .query("select", "*")
            .call()?
            .into_json()?;
        Ok(rows)
    }

    fn select_limit(&self, table: &TableDef, limit: usize) -> BackendResult<Vec<Row>> {
        let rows: Vec<Row> = self
            .request("GET", &self.table_url(table))
            .query("select", "*")
            .query("limit", &limit.to_string())
            .call()?
            .into_json()?;
        Ok(rows)
    }

    fn insert(&self, table: &TableDef, row: &Row) -> BackendResult<()> {
        self.request("POST", &self.table_url(table))
            .set("Content-Type", "application/json")
            .set("Prefer", "return=minimal")
            .send_json(row)?;
        Ok(())
    }

    fn upsert(&self, table: &TableDef, rows: &[Row]) -> BackendResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.request("POST", &self.table_url(table))
            .query("on_conflict", &table.key.join(","))
            .set("Content-Type", "application/json")
            .set("Prefer", "resolution=merge-duplicates,return=minimal")
            .send_json(rows)?;
        Ok(())
    }

    fn ping(&self) -> BackendResult<()> {
        self.request("GET", &format!("{}/rest/v1/", self.base_url))
            .call()?;
        Ok(())
    }
}
