//! SQLite storage medium bootstrap.
//!
//! # Responsibility
//! - Open and configure the SQLite connection that hosts `kv_entries`.
//! - Apply storage migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Slice documents are never read or written before migrations succeed.
//! - Migrations only shape the `kv_entries` table; slice payloads are opaque
//!   JSON and are never migrated here.
//! - Every `DbError` names the bootstrap stage that failed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage bootstrap or statement failure.
#[derive(Debug)]
pub enum DbError {
    /// The store file (or `:memory:`) could not be opened.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// Migration `version` failed; its transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Any other statement on an open connection.
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Stable `error_code` value for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open_failed",
            Self::Migration { .. } => "migration_failed",
            Self::SchemaTooNew { .. } => "schema_too_new",
            Self::Sqlite(_) => "sqlite_error",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open store at {location}: {source}")
            }
            Self::Migration { version, source } => {
                write!(f, "store migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn codes_and_messages_name_the_failing_stage() {
        let too_new = DbError::SchemaTooNew {
            found: 7,
            supported: 1,
        };
        assert_eq!(too_new.code(), "schema_too_new");
        assert!(too_new.to_string().contains("7"));
        assert!(too_new.source().is_none());

        let migration = DbError::Migration {
            version: 1,
            source: rusqlite::Error::InvalidQuery,
        };
        assert_eq!(migration.code(), "migration_failed");
        assert!(migration.to_string().starts_with("store migration 1 failed"));
        assert!(migration.source().is_some());
    }
}
