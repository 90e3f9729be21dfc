//! Key/value storage contract with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide `load`/`save` by string key over string values.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - `save` replaces the whole value for a key (upsert).
//! - `load` of an unknown key is `Ok(None)`, never an error.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Value could not be encoded before writing.
    Serialize(serde_json::Error),
    /// In-memory store lock was poisoned by a panicking writer.
    Poisoned,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode stored value: {err}"),
            Self::Poisoned => write!(f, "key/value store lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable key/value storage injected into selection persistence.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> RepoResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).save(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).save(key, value)
    }
}

/// SQLite-backed key/value store owning its connection.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Opens the store file at `path`, creating and migrating it as needed.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls observed; lets callers assert "no rewrite".
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load(&self, key: &str) -> RepoResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| RepoError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> RepoResult<()> {
        let mut entries = self.entries.lock().map_err(|_| RepoError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};

    #[test]
    fn sqlite_store_upserts_and_reads_back() {
        let store = SqliteKeyValueStore::open_in_memory().unwrap();
        assert_eq!(store.load("k").unwrap(), None);

        store.save("k", "first").unwrap();
        store.save("k", "second").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn memory_store_counts_writes() {
        let store = MemoryKeyValueStore::new();
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.write_count(), 1);
    }
}
