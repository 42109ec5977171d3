//! Key-value store contract and implementations.
//!
//! # Responsibility
//! - Provide `get/set` over string keys and values.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set` is an upsert; the latest write for a key wins.

use crate::db::{ensure_kv_schema, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for key-value persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize value: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
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
        Self::Db(DbError::Query(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed key-value store over the `kv_entries` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `Db(DbError::MissingKvTable)` when the connection was not opened
    ///   through `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_kv_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
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

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory key-value store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all entries.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore, RepoError, SqliteKeyValueStore};
    use crate::db::{open_db_in_memory, DbError};
    use rusqlite::Connection;

    #[test]
    fn sqlite_store_upserts_latest_value() {
        let store = SqliteKeyValueStore::try_new(open_db_in_memory().unwrap()).unwrap();
        assert_eq!(store.get("notes").unwrap(), None);

        store.set("notes", "[]").unwrap();
        store.set("notes", "[1]").unwrap();
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("selectedNoteId").unwrap(), None);
    }

    #[test]
    fn sqlite_store_rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKeyValueStore::try_new(conn).err().unwrap();
        assert!(matches!(err, RepoError::Db(DbError::MissingKvTable)));
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryKeyValueStore::new();
        let handle = store.clone();
        store.set("selectedNoteId", "abc").unwrap();
        assert_eq!(handle.get("selectedNoteId").unwrap().as_deref(), Some("abc"));
        assert_eq!(handle.entries().len(), 1);
    }
}
