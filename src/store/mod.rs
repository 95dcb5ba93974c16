//! Record store contract.
//!
//! The board never talks to storage directly: it goes through [`RecordStore`],
//! which addresses records by collection and document path and pushes a full
//! snapshot of a collection to every subscriber whenever it changes.

pub mod sqlite_store;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::types::errors::StoreError;
use crate::types::record::{NewRecord, Record, RecordPatch};

pub use sqlite_store::SqliteRecordStore;

/// Full, ordered contents of a collection at one point in time.
pub type Snapshot = Arc<Vec<Record>>;

/// Path of a record collection, e.g. `artifacts/boardvault-demo/public/data/notes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// The notes collection of a workspace.
    pub fn notes(workspace_id: &str) -> Self {
        Self(format!("artifacts/{}/public/data/notes", workspace_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the document `id` inside this collection.
    pub fn doc(&self, id: &str) -> DocPath {
        DocPath {
            collection: self.clone(),
            id: id.to_string(),
        }
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    pub collection: CollectionPath,
    pub id: String,
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// A live feed of collection snapshots. Dropping it unsubscribes.
pub struct Subscription {
    rx: watch::Receiver<Snapshot>,
}

impl Subscription {
    pub fn new(rx: watch::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// The newest snapshot, marking it as seen.
    pub fn latest(&mut self) -> Snapshot {
        self.rx.borrow_and_update().clone()
    }

    /// The newest snapshot if one arrived since the last call to `latest`
    /// or `take_changed`.
    pub fn take_changed(&mut self) -> Option<Snapshot> {
        match self.rx.has_changed() {
            Ok(true) => Some(self.latest()),
            _ => None,
        }
    }

    /// Waits for the next pushed snapshot. Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.rx.changed().await.ok()?;
        Some(self.latest())
    }

    /// Releases the feed.
    pub fn unsubscribe(self) {}
}

/// Trait defining the operations the board needs from a record store.
///
/// Writes complete only once the store has acknowledged them. Concurrent
/// writers to the same document overwrite each other (last write wins).
pub trait RecordStore {
    /// Opens a snapshot feed for `collection`. The current contents are
    /// available immediately.
    fn subscribe(&self, collection: &CollectionPath) -> Result<Subscription, StoreError>;

    /// Inserts a record and returns the id the store assigned to it.
    fn create(
        &self,
        collection: &CollectionPath,
        record: NewRecord,
    ) -> impl Future<Output = Result<String, StoreError>>;

    /// Merges `patch` into an existing document. Fails with `NotFound` if absent.
    fn update(&self, doc: &DocPath, patch: RecordPatch) -> impl Future<Output = Result<(), StoreError>>;

    /// Removes a document. Fails with `NotFound` if absent.
    fn delete(&self, doc: &DocPath) -> impl Future<Output = Result<(), StoreError>>;
}
