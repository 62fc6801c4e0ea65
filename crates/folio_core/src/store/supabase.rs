//! Supabase (PostgREST) backed store.
//!
//! The document lives in one row: `{key_column} = {row_id}` with the JSON in
//! `{data_column}` and an integer `{version_column}` used for conditional
//! writes.

use std::time::Duration;

use async_trait::async_trait;
use folio_common::sanitizer::LogSanitizer;
use folio_common::{FolioError, Result, SiteConfig, Versioned};
use folio_config::{StoreConfig, SupabaseConfig};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::{Map, Value};

use super::ConfigStore;

/// Format an unsuccessful REST response for error messages.
fn format_http_error(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        format!("{}", status)
    } else {
        format!("{} - {}", status, body.trim())
    }
}

/// Query selecting the document row and the columns we need.
fn select_query(settings: &StoreConfig) -> Vec<(String, String)> {
    vec![
        (settings.key_column.clone(), format!("eq.{}", settings.row_id)),
        (
            "select".to_string(),
            format!("{},{}", settings.data_column, settings.version_column),
        ),
    ]
}

/// Filter matching the document row only while it is still at `expected`.
fn conditional_filter(settings: &StoreConfig, expected: u64) -> Vec<(String, String)> {
    let column = &settings.version_column;
    let version = if expected == 0 {
        // Rows created before versioning was introduced carry NULL or 0
        ("or".to_string(), format!("({0}.is.null,{0}.eq.0)", column))
    } else {
        (column.clone(), format!("eq.{}", expected))
    };
    vec![
        (settings.key_column.clone(), format!("eq.{}", settings.row_id)),
        version,
    ]
}

/// Body for writing `config` at `version`; the key is included for inserts.
fn row_body(settings: &StoreConfig, config: &SiteConfig, version: u64, with_key: bool) -> Result<Value> {
    let mut row = Map::new();
    if with_key {
        row.insert(settings.key_column.clone(), Value::from(settings.row_id));
    }
    row.insert(settings.data_column.clone(), serde_json::to_value(config)?);
    row.insert(settings.version_column.clone(), Value::from(version));
    Ok(Value::Object(row))
}

/// Turn the rows returned by a select into a versioned document.
fn parse_rows(settings: &StoreConfig, rows: Vec<Value>) -> Result<Versioned> {
    let Some(row) = rows.into_iter().next() else {
        return Ok(Versioned::default());
    };

    let version = row
        .get(&settings.version_column)
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let config = match row.get(&settings.data_column) {
        None | Some(Value::Null) => SiteConfig::default(),
        // Text columns hand back the document as an encoded string
        Some(Value::String(raw)) => serde_json::from_str(raw).map_err(|e| {
            FolioError::StoreRead(format!("stored document is not valid JSON: {}", e))
        })?,
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            FolioError::StoreRead(format!("stored document has an unexpected shape: {}", e))
        })?,
    };

    Ok(Versioned { version, config })
}

/// Store talking to the Supabase REST endpoint.
#[derive(Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    table_url: String,
    anon_key: String,
    settings: StoreConfig,
    sanitizer: std::sync::Arc<LogSanitizer>,
}

impl SupabaseStore {
    pub fn new(supabase: &SupabaseConfig, settings: &StoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FolioError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            table_url: format!(
                "{}/rest/v1/{}",
                supabase.url.trim_end_matches('/'),
                settings.table
            ),
            anon_key: supabase.anon_key.clone(),
            settings: settings.clone(),
            sanitizer: std::sync::Arc::new(LogSanitizer::new()),
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Conditional update; `Ok(false)` when no row matched the filter.
    async fn patch_row(&self, expected: u64, config: &SiteConfig) -> Result<bool> {
        let body = row_body(&self.settings, config, expected + 1, false)?;
        let response = self
            .request(Method::PATCH)
            .query(&conditional_filter(&self.settings, expected))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.write_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.write_error(format_http_error(status, &body)));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| self.write_error(e.to_string()))?;
        Ok(!rows.is_empty())
    }

    /// First write ever; a unique-key violation means someone beat us to it.
    async fn insert_row(&self, config: &SiteConfig) -> Result<()> {
        let body = row_body(&self.settings, config, 1, true)?;
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.write_error(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Err(FolioError::VersionConflict);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.write_error(format_http_error(status, &body)));
        }
        Ok(())
    }

    fn read_error(&self, message: String) -> FolioError {
        let message = self.sanitizer.sanitize(&message);
        tracing::error!(table = %self.settings.table, error = %message, "Config read failed");
        FolioError::StoreRead(message)
    }

    fn write_error(&self, message: String) -> FolioError {
        let message = self.sanitizer.sanitize(&message);
        tracing::error!(table = %self.settings.table, error = %message, "Config write failed");
        FolioError::StoreWrite(message)
    }
}

#[async_trait]
impl ConfigStore for SupabaseStore {
    async fn load(&self) -> Result<Versioned> {
        let response = self
            .request(Method::GET)
            .query(&select_query(&self.settings))
            .send()
            .await
            .map_err(|e| self.read_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.read_error(format_http_error(status, &body)));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| self.read_error(e.to_string()))?;

        let loaded = parse_rows(&self.settings, rows)?;
        tracing::debug!(version = loaded.version, "Loaded config row");
        Ok(loaded)
    }

    async fn save(&self, expected: u64, config: &SiteConfig) -> Result<u64> {
        if self.patch_row(expected, config).await? {
            return Ok(expected + 1);
        }
        if expected == 0 {
            self.insert_row(config).await?;
            return Ok(1);
        }
        Err(FolioError::VersionConflict)
    }
}
