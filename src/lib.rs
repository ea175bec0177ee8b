// Expense Tracker - Core Library
// Store, aggregation and persistence, shared by the TUI and the one-shot commands

pub mod expense;
pub mod store;
pub mod aggregate;
pub mod storage;
pub mod tracker;
pub mod view;
pub mod charts;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use expense::{Expense, ExpenseFields, ExpenseInput, ValidationError};
pub use store::{CategoryFilter, ExpenseStore, ALL_CATEGORIES};
pub use aggregate::{series_by_category, series_by_date, summarize, CategorySeries, Summary};
pub use storage::{
    export_csv, ExpenseRepository, FileStore, KeyValueStore, MemoryStore, SqliteStore,
    DEFAULT_STORAGE_KEY,
};
pub use tracker::{Tracker, View};
pub use charts::{ChartBoard, ChartHandle, ChartSlot, LineChart, PieChart};
pub use config::{Config, StorageBackend};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
