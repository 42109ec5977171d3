//! SQLite bootstrap for the JotBook key-value schema.
//!
//! # Responsibility
//! - Open the database that holds `kv_entries` and bring its schema up to date.
//! - Verify that a connection handed to the key-value store carries that
//!   table.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A database stamped by a newer build is refused, never downgraded.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding every persisted key.
pub const KV_TABLE: &str = "kv_entries";

pub type DbResult<T> = Result<T, DbError>;

/// Failure while preparing or querying the note database.
#[derive(Debug)]
pub enum DbError {
    /// The file (or in-memory database) could not be opened.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// Migration `version` failed; its transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a build with a newer schema.
    SchemaTooNew { found: u32, supported: u32 },
    /// The connection has no `kv_entries` table.
    MissingKvTable,
    Query(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => write!(f, "cannot open notes database {target}: {source}"),
            Self::Migration { version, source } => {
                write!(f, "notes schema migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "notes database uses schema {found}, this build understands up to {supported}"
            ),
            Self::MissingKvTable => write!(f, "connection has no `{KV_TABLE}` table; open it with open_db"),
            Self::Query(err) => write!(f, "notes database query failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Query(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::MissingKvTable => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}

/// Checks that `conn` carries the key-value table.
pub fn ensure_kv_schema(conn: &Connection) -> DbResult<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [KV_TABLE],
        |row| row.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(DbError::MissingKvTable)
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_kv_schema, open_db_in_memory, DbError};
    use rusqlite::Connection;

    #[test]
    fn kv_schema_check_follows_migrations() {
        let bare = Connection::open_in_memory().unwrap();
        assert!(matches!(ensure_kv_schema(&bare), Err(DbError::MissingKvTable)));

        let migrated = open_db_in_memory().unwrap();
        ensure_kv_schema(&migrated).unwrap();
    }
}
