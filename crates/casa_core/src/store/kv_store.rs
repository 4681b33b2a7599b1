//! Storage medium contract and its SQLite/in-memory implementations.
//!
//! # Invariants
//! - `set` is atomic per key: readers observe the old or the new value.
//! - No operation spans more than one key.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of the underlying storage medium.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Medium refused the operation (full, read-only, switched off).
    Unavailable(String),
    /// A previous holder of the medium lock panicked.
    LockPoisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::LockPoisoned => write!(f, "storage lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::LockPoisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed, string-valued storage medium shared process-wide.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
    /// Returns all stored keys in ascending order.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// SQLite-backed medium over the `kv_entries` table.
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    /// Wraps an already-migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

/// Process-local medium. Can be switched off to simulate a failing device.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<BTreeMap<String, String>>,
    unavailable: AtomicBool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, every operation fails with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn entries(&self) -> StoreResult<MutexGuard<'_, BTreeMap<String, String>>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("medium switched off".to_string()));
        }
        self.entries.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError};

    #[test]
    fn sqlite_set_replaces_previous_value() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        store.set("tarefas", "[1]").unwrap();
        store.set("tarefas", "[2]").unwrap();

        assert_eq!(store.get("tarefas").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.keys().unwrap(), vec!["tarefas".to_string()]);
    }

    #[test]
    fn sqlite_missing_key_reads_as_none() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(store.get("never").unwrap(), None);
    }

    #[test]
    fn sqlite_remove_deletes_only_target_key() {
        let store = SqliteKvStore::open_in_memory().unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn memory_store_fails_while_unavailable() {
        let store = MemoryKvStore::new();
        store.set("k", "v").unwrap();
        store.set_unavailable(true);

        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));

        store.set_unavailable(false);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
