#![allow(clippy::unwrap_used)]

use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    id: String,
    body: String,
}

fn note(id: &str, body: &str) -> Note {
    Note {
        id: id.into(),
        body: body.into(),
    }
}

fn memory_store() -> JsonStore<MemoryStore> {
    JsonStore::new(MemoryStore::default())
}

// ── JsonStore ─────────────────────────────────────────────────

#[test]
fn test_absent_collection_reads_empty() {
    let store = memory_store();
    let notes: Vec<Note> = store.read(Collection::Transactions).unwrap();
    assert!(notes.is_empty());
    let present: Option<Vec<Note>> = store.read_present(Collection::Transactions).unwrap();
    assert!(present.is_none());
}

#[test]
fn test_empty_collection_is_present() {
    let store = memory_store();
    store.write::<Note>(Collection::Categories, &[]).unwrap();
    let present: Option<Vec<Note>> = store.read_present(Collection::Categories).unwrap();
    assert_eq!(present, Some(Vec::new()));
}

#[test]
fn test_write_replaces_whole_collection() {
    let store = memory_store();
    store
        .write(Collection::Transactions, &[note("1", "a"), note("2", "b")])
        .unwrap();
    store
        .write(Collection::Transactions, &[note("3", "c")])
        .unwrap();
    let notes: Vec<Note> = store.read(Collection::Transactions).unwrap();
    assert_eq!(notes, vec![note("3", "c")]);
}

#[test]
fn test_collections_are_independent() {
    let store = memory_store();
    store
        .write(Collection::Transactions, &[note("1", "txn")])
        .unwrap();
    let categories: Vec<Note> = store.read(Collection::Categories).unwrap();
    assert!(categories.is_empty());
}

#[test]
fn test_malformed_collection_is_an_error() {
    let store = memory_store();
    store.backend().set("transactions", "{not json").unwrap();
    let err = store.read::<Note>(Collection::Transactions).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Malformed {
            collection: Collection::Transactions,
            ..
        }
    ));
    assert!(err.to_string().contains("transactions"));
}

#[test]
fn test_wrong_shape_is_malformed() {
    let store = memory_store();
    store.backend().set("categories", r#"{"id":"1"}"#).unwrap();
    let err = store.read::<Note>(Collection::Categories).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
}

#[test]
fn test_markers() {
    let store = memory_store();
    assert!(!store.has_marker("seeded").unwrap());
    store.set_marker("seeded").unwrap();
    assert!(store.has_marker("seeded").unwrap());
}

#[test]
fn test_collection_keys() {
    assert_eq!(Collection::Transactions.key(), "transactions");
    assert_eq!(Collection::Categories.key(), "categories");
    assert_eq!(Collection::MonthlyBudgets.key(), "budgets");
    assert_eq!(format!("{}", Collection::MonthlyBudgets), "budgets");
}

// ── SqliteStore ───────────────────────────────────────────────

#[test]
fn test_sqlite_get_missing_key() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.get("nothing").unwrap().is_none());
}

#[test]
fn test_sqlite_set_overwrites() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");

    {
        let store = JsonStore::new(SqliteStore::open(&path).unwrap());
        store
            .write(Collection::Transactions, &[note("1", "kept")])
            .unwrap();
    }

    let store = JsonStore::new(SqliteStore::open(&path).unwrap());
    let notes: Vec<Note> = store.read(Collection::Transactions).unwrap();
    assert_eq!(notes, vec![note("1", "kept")]);
}

#[test]
fn test_sqlite_reopen_does_not_reset_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    SqliteStore::open(&path).unwrap().set("k", "v").unwrap();
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}
