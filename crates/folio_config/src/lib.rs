//! Configuration management for Folio
//!
//! Settings come from an optional `folio.toml` file and the process
//! environment. Environment variables always win over the file; the Supabase
//! credentials can only come from the environment.

use folio_common::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the Supabase project URL
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
/// Environment variable holding the Supabase anon key
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
/// Environment variable selecting the config file
pub const ENV_CONFIG_PATH: &str = "FOLIO_CONFIG";
pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";

/// File looked up in the working directory when `FOLIO_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Supabase credentials (environment only, never read from TOML)
    #[serde(skip)]
    pub supabase: SupabaseConfig,

    /// Document storage settings
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Supabase project credentials
#[derive(Clone, Default)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"***")
            .finish()
    }
}

/// Storage configuration ([store])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Table holding the document row
    #[serde(default = "default_table")]
    pub table: String,

    /// Column identifying the row
    #[serde(default = "default_key_column")]
    pub key_column: String,

    /// Key of the single document row
    #[serde(default = "default_row_id")]
    pub row_id: i64,

    /// JSON column holding the document
    #[serde(default = "default_data_column")]
    pub data_column: String,

    /// Integer column used for optimistic concurrency
    #[serde(default = "default_version_column")]
    pub version_column: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many times a mutation is re-applied after losing a write race
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_table() -> String {
    "configs".to_string()
}
fn default_key_column() -> String {
    "id".to_string()
}
fn default_row_id() -> i64 {
    1
}
fn default_data_column() -> String {
    "data".to_string()
}
fn default_version_column() -> String {
    "version".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_attempts() -> u32 {
    3
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            key_column: default_key_column(),
            row_id: default_row_id(),
            data_column: default_data_column(),
            version_column: default_version_column(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// HTTP server configuration ([server])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment and the config file
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the process environment
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::settings_with(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but Supabase credentials are not required
    ///
    /// For runs against the in-memory store.
    pub fn load_settings() -> Result<Self> {
        Self::settings_with(|key| std::env::var(key).ok())
    }

    fn settings_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match lookup(ENV_CONFIG_PATH) {
            Some(p) => Some(PathBuf::from(p)),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let mut config = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };

        config.apply_env(&lookup)?;
        Ok(config)
    }

    /// Parse a TOML config file; credentials are not read from it
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FolioError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            FolioError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_SUPABASE_URL) {
            self.supabase.url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(key) = non_empty(ENV_SUPABASE_ANON_KEY) {
            self.supabase.anon_key = key.trim().to_string();
        }
        if let Some(host) = non_empty(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = non_empty(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                FolioError::ConfigError(format!("{} must be a port number, got '{}'", ENV_PORT, port))
            })?;
        }
        Ok(())
    }

    /// Check that everything needed to reach the store is present
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.supabase.url.is_empty() {
            missing.push(ENV_SUPABASE_URL);
        }
        if self.supabase.anon_key.is_empty() {
            missing.push(ENV_SUPABASE_ANON_KEY);
        }
        if !missing.is_empty() {
            return Err(FolioError::ConfigError(format!(
                "Missing required environment variable(s): {}",
                missing.join(", ")
            )));
        }

        if !self.supabase.url.starts_with("http://") && !self.supabase.url.starts_with("https://") {
            return Err(FolioError::ConfigError(format!(
                "{} must start with http:// or https://",
                ENV_SUPABASE_URL
            )));
        }
        if self.store.table.is_empty()
            || self.store.data_column.is_empty()
            || self.store.version_column.is_empty()
            || self.store.key_column.is_empty()
        {
            return Err(FolioError::ConfigError(
                "store table and column names cannot be empty".to_string(),
            ));
        }
        if self.store.max_attempts == 0 {
            return Err(FolioError::ConfigError(
                "store.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.store.timeout_secs == 0 {
            return Err(FolioError::ConfigError(
                "store.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(FolioError::ConfigError(
                "server.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
