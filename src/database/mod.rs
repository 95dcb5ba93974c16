//! Storage for the record store: one SQLite file holding every collection.
//!
//! ```no_run
//! use boardvault::database::Database;
//!
//! let db = Database::open("boardvault.db")?;
//! let count: i64 = db
//!     .connection()
//!     .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
//! # Ok::<(), rusqlite::Error>(())
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
