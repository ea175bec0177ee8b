// Configuration - defaults, then an optional TOML file, then environment

use crate::storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore, DEFAULT_STORAGE_KEY};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const APP_DIR: &str = "expense-tracker";

pub const ENV_CONFIG: &str = "EXPENSE_TRACKER_CONFIG";
pub const ENV_DATA_DIR: &str = "EXPENSE_TRACKER_DATA_DIR";
pub const ENV_BACKEND: &str = "EXPENSE_TRACKER_BACKEND";
pub const ENV_KEY: &str = "EXPENSE_TRACKER_KEY";
pub const ENV_LOG: &str = "EXPENSE_TRACKER_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Json,
    Sqlite,
    Memory,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("Unknown storage backend {:?} (expected json, sqlite or memory)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
    pub storage_key: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(".expense-tracker"));

        Self {
            data_dir,
            backend: StorageBackend::Json,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Full resolution for the running process
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(ENV_CONFIG)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml")));

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Override fields from environment-style variables looked up by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.backend = StorageBackend::parse(&backend)?;
        }
        if let Some(key) = lookup(ENV_KEY) {
            self.storage_key = key;
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level;
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("expenses.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("expense-tracker.log")
    }

    /// Open the configured key-value backend
    pub fn open_storage(&self) -> Result<Box<dyn KeyValueStore>> {
        info!(backend = ?self.backend, data_dir = ?self.data_dir, "opening storage");

        let store: Box<dyn KeyValueStore> = match self.backend {
            StorageBackend::Json => Box::new(FileStore::open(&self.data_dir)?),
            StorageBackend::Sqlite => Box::new(SqliteStore::open(&self.database_path())?),
            StorageBackend::Memory => Box::new(MemoryStore::new()),
        };
        Ok(store)
    }
}
