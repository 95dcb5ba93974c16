//! Unit tests for `SqliteRecordStore` through the `RecordStore` trait.

use boardvault::database::Database;
use boardvault::store::{CollectionPath, RecordStore, SqliteRecordStore};
use boardvault::types::errors::StoreError;
use boardvault::types::record::{NewRecord, RecordPatch};

fn setup() -> (SqliteRecordStore, CollectionPath) {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    (SqliteRecordStore::new(db), CollectionPath::notes("test-ws"))
}

fn new_record(title: &str, category: &str) -> NewRecord {
    NewRecord {
        title: title.to_string(),
        url: format!("https://{}.example.com", title.to_lowercase()),
        description: String::new(),
        category: category.to_string(),
        archived: false,
        created_at: 100,
        updated_at: 100,
    }
}

#[test]
fn test_collection_paths() {
    let collection = CollectionPath::notes("boardvault-demo");
    assert_eq!(collection.as_str(), "artifacts/boardvault-demo/public/data/notes");
    assert_eq!(
        collection.doc("abc").to_string(),
        "artifacts/boardvault-demo/public/data/notes/abc"
    );
}

#[tokio::test]
async fn test_create_assigns_unique_ids_in_insertion_order() {
    let (store, notes) = setup();
    let a = store.create(&notes, new_record("A", "ideas")).await.unwrap();
    let b = store.create(&notes, new_record("B", "ideas")).await.unwrap();
    assert_ne!(a, b);

    let all = store.fetch_all(&notes).unwrap();
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![a.as_str(), b.as_str()]);
}

#[tokio::test]
async fn test_update_merges_only_given_fields() {
    let (store, notes) = setup();
    let id = store.create(&notes, new_record("A", "ideas")).await.unwrap();

    store
        .update(
            &notes.doc(&id),
            RecordPatch {
                archived: Some(true),
                ..RecordPatch::default()
            },
        )
        .await
        .unwrap();

    let record = store.fetch_all(&notes).unwrap().remove(0);
    assert!(record.archived);
    assert_eq!(record.title, "A");
    assert_eq!(record.url, "https://a.example.com");
    assert_eq!(record.updated_at, 100);
}

#[tokio::test]
async fn test_update_and_delete_missing_document_fail() {
    let (store, notes) = setup();
    let missing = notes.doc("nope");

    let err = store.update(&missing, RecordPatch::default()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    let err = store.delete(&missing).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_collections_are_isolated() {
    let (store, notes) = setup();
    let other = CollectionPath::notes("other-ws");
    let id = store.create(&notes, new_record("A", "ideas")).await.unwrap();

    assert!(store.fetch_all(&other).unwrap().is_empty());
    let err = store.delete(&other.doc(&id)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(store.fetch_all(&notes).unwrap().len(), 1);
}

#[tokio::test]
async fn test_subscription_receives_full_snapshot_after_each_write() {
    let (store, notes) = setup();
    store.create(&notes, new_record("A", "ideas")).await.unwrap();

    let mut sub = store.subscribe(&notes).unwrap();
    assert_eq!(sub.latest().len(), 1);
    assert!(sub.take_changed().is_none());

    let b = store.create(&notes, new_record("B", "tools")).await.unwrap();
    let snapshot = sub.take_changed().expect("create should push a snapshot");
    assert_eq!(snapshot.len(), 2);

    store.delete(&notes.doc(&b)).await.unwrap();
    let snapshot = sub.changed().await.expect("delete should push a snapshot");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].title, "A");
}

#[tokio::test]
async fn test_two_subscribers_share_the_feed() {
    let (store, notes) = setup();
    let mut first = store.subscribe(&notes).unwrap();
    let mut second = store.subscribe(&notes).unwrap();
    first.latest();
    second.latest();

    store.create(&notes, new_record("A", "ideas")).await.unwrap();
    assert_eq!(first.take_changed().map(|s| s.len()), Some(1));
    assert_eq!(second.take_changed().map(|s| s.len()), Some(1));

    first.unsubscribe();
    store.create(&notes, new_record("B", "ideas")).await.unwrap();
    assert_eq!(second.take_changed().map(|s| s.len()), Some(2));
}
