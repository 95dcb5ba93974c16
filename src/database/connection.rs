//! SQLite connection management for BoardVault.

use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

use super::migrations;

/// Owns the `rusqlite::Connection` behind the record store. The schema is
/// brought up to date before the handle is returned.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path`.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the file cannot be opened or a migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open(path)?)
    }

    /// A throwaway database, gone when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        debug!(
            version = migrations::get_schema_version(&conn),
            "database schema ready"
        );
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
