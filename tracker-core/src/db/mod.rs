//! SQLite-backed document store.
//!
//! Documents live in a single `documents` table, grouped by collection, with
//! their fields kept as a JSON object. The handle is cheap to clone and all
//! clones share one connection.

mod chat;
mod filter;
mod health;
mod notes;
mod projects;
mod schema;
mod store;
mod tasks;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::error::{Error, Result};

pub use chat::{EMPTY_QUERY_REPLY, NO_MATCH_REPLY};
pub use filter::Filter;
pub use health::SelfCheck;
pub use schema::SCHEMA;
pub use store::{Collection, CollectionStats, FindOptions, Sort};

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    location: String,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("location", &self.location)
            .finish()
    }
}

impl Database {
    /// Opens (or creates) a database file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::from_connection(conn, path.display().to_string())
    }

    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, ":memory:".to_string())
    }

    /// Opens the database in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "tracker")
            .ok_or_else(|| Error::Internal("could not determine a home directory".into()))?;
        Ok(dirs.data_dir().join("tracker.db"))
    }

    fn from_connection(conn: Connection, location: String) -> Result<Self> {
        register_functions(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location,
        })
    }

    /// Applies the schema. Safe to run repeatedly.
    pub fn migrate(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })?;
        tracing::info!(location = %self.location, "database schema ready");
        Ok(())
    }

    /// Where this database lives, or `:memory:`.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| Error::Internal("database mutex poisoned".into()))?;
        f(&conn)
    }
}

/// `casefold(text)` lowercases with full Unicode rules, unlike SQLite's
/// ASCII-only `lower()`. Non-text input yields NULL.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).to_lowercase()),
                _ => None,
            })
        },
    )?;
    Ok(())
}
