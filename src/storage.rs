// Persistence - a durable key-value slot holding the whole expense list
//
// The list is rewritten as a single JSON array after every add or delete and
// read back once at startup. Three backends share the `KeyValueStore` trait:
// - FileStore:   one `<key>.json` file per key inside a data directory
// - SqliteStore: a `kv_store` table in a SQLite database (WAL mode)
// - MemoryStore: an in-process map for tests and throwaway sessions

use crate::expense::Expense;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key the expense list is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

// ============================================================================
// KEY-VALUE STORE
// ============================================================================

pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

// ============================================================================
// MEMORY BACKEND
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes performed so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

// ============================================================================
// FILE BACKEND
// ============================================================================

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the store, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {:?}", dir))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Some(content))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        // Write to a sibling first so a crash never leaves a half-written slot
        fs::write(&tmp_path, value)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {:?}", path))?;

        debug!(?path, bytes = value.len(), "slot written");
        Ok(())
    }
}

// ============================================================================
// SQLITE BACKEND
// ============================================================================

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn)?;
        Ok(Self { conn })
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // WAL for crash recovery; in-memory databases report "memory" instead
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    debug!(journal_mode = %mode, "database ready");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

// ============================================================================
// EXPENSE REPOSITORY
// ============================================================================

/// Loads and saves the full expense list under one key of a `KeyValueStore`
pub struct ExpenseRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ExpenseRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Persisted list. Absent, unreadable or malformed data all read as empty.
    pub fn load(&self) -> Vec<Expense> {
        let raw = match self.store.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(key = %self.key, "no saved expenses, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read saved expenses");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Expense>>(&raw) {
            Ok(expenses) => {
                info!(key = %self.key, count = expenses.len(), "loaded expenses");
                expenses
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved expenses are malformed, ignoring them");
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted list with `expenses`
    pub fn save(&mut self, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string(expenses).context("Failed to serialize expenses")?;
        self.store
            .write(&self.key, &json)
            .with_context(|| format!("Failed to save expenses under key {:?}", self.key))?;

        debug!(key = %self.key, count = expenses.len(), "saved expenses");
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

// ============================================================================
// CSV EXPORT
// ============================================================================

/// Write `expenses` as CSV with an `id,description,amount,category,date` header
pub fn export_csv(csv_path: &Path, expenses: &[Expense]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(csv_path)
        .with_context(|| format!("Failed to create CSV file {:?}", csv_path))?;

    for expense in expenses {
        wtr.serialize(expense).context("Failed to write expense row")?;
    }
    wtr.flush().context("Failed to flush CSV file")?;

    info!(path = ?csv_path, count = expenses.len(), "exported expenses");
    Ok(expenses.len())
}
