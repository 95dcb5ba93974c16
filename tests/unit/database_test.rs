//! Unit tests for the BoardVault database layer (connection + migrations).

use boardvault::database::migrations::{get_schema_version, run_all, CURRENT_SCHEMA_VERSION};
use boardvault::database::Database;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_records_table_and_index() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    for (kind, name) in [("table", "records"), ("index", "idx_records_collection")] {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type=?1 AND name=?2",
                [kind, name],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "{} '{}' should exist after migrations", kind, name);
    }
}

#[test]
fn test_collection_listing_uses_index() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let plan: Vec<String> = {
        let mut stmt = db
            .connection()
            .prepare(
                "EXPLAIN QUERY PLAN SELECT id FROM records WHERE collection = ?1 ORDER BY rowid",
            )
            .unwrap();
        stmt.query_map(["c"], |row| row.get::<_, String>(3))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    };
    assert!(
        plan.iter().any(|step| step.contains("idx_records_collection")),
        "plan should use the collection index: {:?}",
        plan
    );
}

#[test]
fn test_schema_version_is_current() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert!(run_all(db.connection()).is_ok());
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("board.db");

    {
        let db = Database::open(&path).unwrap();
        db.connection()
            .execute(
                "INSERT INTO records (id, collection, title, url, category, created_at, updated_at) \
                 VALUES ('r1', 'c', 'T', 'https://x.com', 'ideas', 1, 1)",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let (description, archived): (String, bool) = db
        .connection()
        .query_row(
            "SELECT description, archived FROM records WHERE id = 'r1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(description, "");
    assert!(!archived);
}
