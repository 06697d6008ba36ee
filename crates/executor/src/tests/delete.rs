//! Delete request handling.

use std::sync::Arc;

use dsview_core::{Key, KeySegment, Namespace};
use dsview_engine::{MemoryDatastore, StoreMode};
use serde_json::json;

use super::{player, seed, RecordingStore};
use crate::{Command, DeleteRequest, Error, Executor, Output};

fn recording() -> (Arc<RecordingStore>, Executor) {
    let inner = MemoryDatastore::new();
    seed(&inner);
    let store = Arc::new(RecordingStore::new(inner));
    let executor = Executor::new(store.clone(), StoreMode::Datastore);
    (store, executor)
}

fn delete(keys: &[&str]) -> Command {
    Command::DeleteEntities {
        namespace: "default".into(),
        kind: "Player".into(),
        keys: keys.iter().map(|k| k.to_string()).collect(),
    }
}

#[test]
fn test_ancestor_path_submits_every_reading() {
    let (store, executor) = recording();
    let output = executor.execute(delete(&["/Player,7/Item,3"])).unwrap();
    assert_eq!(
        output,
        Output::Deleted {
            requested: 1,
            submitted: 4
        }
    );

    let deletes = store.deletes.lock();
    assert_eq!(deletes.len(), 1);
    let (ns, keys) = &deletes[0];
    assert!(ns.is_default());
    assert_eq!(
        keys,
        &vec![
            Key::from_segments(vec![KeySegment::new("Player", 7i64), KeySegment::new("Item", 3i64)])
                .unwrap(),
            Key::from_segments(vec![KeySegment::new("Player", 7i64), KeySegment::new("Item", "3")])
                .unwrap(),
            Key::from_segments(vec![KeySegment::new("Player", "7"), KeySegment::new("Item", 3i64)])
                .unwrap(),
            Key::from_segments(vec![KeySegment::new("Player", "7"), KeySegment::new("Item", "3")])
                .unwrap(),
        ]
    );
    // The primary reading is a fully reconstructed child of Player(7).
    assert_eq!(keys[0].parent(), Some(player(7)));
    drop(deletes);

    assert!(!store
        .inner
        .contains(&Namespace::default(), &player(7).child("Item", 3i64).unwrap()));
    assert!(store.inner.contains(&Namespace::default(), &player(7)));
}

#[test]
fn test_named_path_submits_one_key() {
    let (store, executor) = recording();
    executor.execute(delete(&["/Player,alice"])).unwrap();

    let deletes = store.deletes.lock();
    assert_eq!(
        deletes[0].1,
        vec![Key::name_key("Player", "alice", None).unwrap()]
    );
    drop(deletes);
    assert!(!store.inner.contains(
        &Namespace::default(),
        &Key::name_key("Player", "alice", None).unwrap()
    ));
}

#[test]
fn test_malformed_path_fails_before_any_delete() {
    let (store, executor) = recording();
    let err = executor
        .execute(delete(&["/Player,7", "/Player"]))
        .unwrap_err();

    match &err {
        Error::MalformedKeyPath { path, code, .. } => {
            assert_eq!(path, "/Player");
            assert_eq!(code, "missing_delimiter");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(err.status_code(), 400);
    assert!(store.deletes.lock().is_empty());
    assert!(store.inner.contains(&Namespace::default(), &player(7)));
}

#[test]
fn test_empty_kind_segment_is_malformed() {
    let (_, executor) = recording();
    let err = executor.execute(delete(&["/,7"])).unwrap_err();
    assert!(matches!(err, Error::MalformedKeyPath { .. }));
}

#[test]
fn test_empty_request_skips_store() {
    let (store, executor) = recording();
    let output = executor.execute(delete(&[])).unwrap();
    assert_eq!(output.to_json().unwrap(), json!({"deleted": 0}));
    assert!(store.deletes.lock().is_empty());
}

#[test]
fn test_repeated_delete_is_noop() {
    let (store, executor) = recording();
    executor.execute(delete(&["/Player,2"])).unwrap();
    executor.execute(delete(&["/Player,2"])).unwrap();
    assert_eq!(store.deletes.lock().len(), 2);
    assert!(!store.inner.contains(&Namespace::default(), &player(2)));
}

#[test]
fn test_duplicate_paths_submit_keys_once() {
    let (store, executor) = recording();
    let output = executor
        .execute(delete(&["/Player,alice", "/Player,alice"]))
        .unwrap();
    assert_eq!(
        output,
        Output::Deleted {
            requested: 2,
            submitted: 1
        }
    );
    assert_eq!(store.deletes.lock()[0].1.len(), 1);
}

#[test]
fn test_request_body_to_response() {
    let (_, executor) = recording();
    let cmd = DeleteRequest::from_json(br#"{"keys":["/Player,7/Item,3","/Player,alice"]}"#)
        .unwrap()
        .into_command("default", "Item");
    let body = executor.execute(cmd).unwrap().to_json_string().unwrap();
    assert_eq!(body, r#"{"deleted":2}"#);
}
