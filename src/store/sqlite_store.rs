//! SQLite-backed implementation of [`RecordStore`].
//!
//! Every successful write reloads the touched collection and pushes the full
//! snapshot to its subscribers. There is no incremental diffing.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use super::{CollectionPath, DocPath, RecordStore, Snapshot, Subscription};
use crate::database::Database;
use crate::types::errors::StoreError;
use crate::types::record::{NewRecord, Record, RecordPatch};

/// Record store over a local SQLite database.
pub struct SqliteRecordStore {
    db: Mutex<Database>,
    feeds: Mutex<HashMap<CollectionPath, watch::Sender<Snapshot>>>,
}

impl SqliteRecordStore {
    pub fn new(db: Database) -> Self {
        Self {
            db: Mutex::new(db),
            feeds: Mutex::new(HashMap::new()),
        }
    }

    fn db(&self) -> Result<MutexGuard<'_, Database>, StoreError> {
        self.db
            .lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
        Ok(Record {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            archived: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    /// Loads a collection in insertion order.
    fn load(conn: &Connection, collection: &CollectionPath) -> Result<Vec<Record>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT id, title, url, description, category, archived, created_at, updated_at \
             FROM records WHERE collection = ?1 ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![collection.as_str()], Self::row_to_record)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Returns the current contents of a collection without subscribing.
    pub fn fetch_all(&self, collection: &CollectionPath) -> Result<Vec<Record>, StoreError> {
        let db = self.db()?;
        Self::load(db.connection(), collection)
    }

    /// Pushes a fresh snapshot to the collection's subscribers, if it has any feed.
    fn publish(&self, collection: &CollectionPath) -> Result<(), StoreError> {
        let feeds = self
            .feeds
            .lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        if let Some(tx) = feeds.get(collection) {
            let snapshot = self.fetch_all(collection)?;
            debug!(collection = %collection, records = snapshot.len(), "pushing snapshot");
            tx.send_replace(Snapshot::new(snapshot));
        }
        Ok(())
    }
}

impl RecordStore for SqliteRecordStore {
    fn subscribe(&self, collection: &CollectionPath) -> Result<Subscription, StoreError> {
        let snapshot = Snapshot::new(self.fetch_all(collection)?);
        let mut feeds = self
            .feeds
            .lock()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        let rx = match feeds.get(collection) {
            Some(tx) => {
                tx.send_replace(snapshot);
                tx.subscribe()
            }
            None => {
                let (tx, rx) = watch::channel(snapshot);
                feeds.insert(collection.clone(), tx);
                rx
            }
        };
        Ok(Subscription::new(rx))
    }

    async fn create(&self, collection: &CollectionPath, record: NewRecord) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        {
            let db = self.db()?;
            db.connection().execute(
                "INSERT INTO records (id, collection, title, url, description, category, archived, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    id,
                    collection.as_str(),
                    record.title,
                    record.url,
                    record.description,
                    record.category,
                    record.archived,
                    record.created_at,
                    record.updated_at
                ],
            )?;
        }
        debug!(collection = %collection, id = %id, "record created");
        self.publish(collection)?;
        Ok(id)
    }

    async fn update(&self, doc: &DocPath, patch: RecordPatch) -> Result<(), StoreError> {
        let affected = {
            let db = self.db()?;
            db.connection().execute(
                "UPDATE records SET \
                    title = COALESCE(?1, title), \
                    url = COALESCE(?2, url), \
                    description = COALESCE(?3, description), \
                    category = COALESCE(?4, category), \
                    archived = COALESCE(?5, archived), \
                    updated_at = COALESCE(?6, updated_at) \
                 WHERE id = ?7 AND collection = ?8",
                params![
                    patch.title,
                    patch.url,
                    patch.description,
                    patch.category,
                    patch.archived,
                    patch.updated_at,
                    doc.id,
                    doc.collection.as_str()
                ],
            )?
        };

        if affected == 0 {
            return Err(StoreError::NotFound(doc.to_string()));
        }
        debug!(doc = %doc, "record updated");
        self.publish(&doc.collection)
    }

    async fn delete(&self, doc: &DocPath) -> Result<(), StoreError> {
        let affected = {
            let db = self.db()?;
            db.connection().execute(
                "DELETE FROM records WHERE id = ?1 AND collection = ?2",
                params![doc.id, doc.collection.as_str()],
            )?
        };

        if affected == 0 {
            return Err(StoreError::NotFound(doc.to_string()));
        }
        debug!(doc = %doc, "record deleted");
        self.publish(&doc.collection)
    }
}
