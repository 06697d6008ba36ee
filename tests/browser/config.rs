//! Executor configured from `dsview.toml`.

use std::sync::Arc;

use dsview::{Command, DsviewConfig, Executor, MemoryDatastore, Namespace, Property, Key};
use tempfile::TempDir;

use crate::common::body;

#[test]
fn firestore_config_drives_discovery() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dsview.toml");
    std::fs::write(
        &path,
        "project_id = \"demo\"\nentities = \"Player,Item\"\nproperty_sample_size = 2\n",
    )
    .unwrap();
    let config = DsviewConfig::from_file(&path).unwrap();

    let store = MemoryDatastore::new().without_metadata();
    store.put(
        &Namespace::default(),
        Key::id_key("Player", 1, None).unwrap(),
        vec![Property::new("b", 1i64)],
    );
    store.put(
        &Namespace::default(),
        Key::id_key("Player", 2, None).unwrap(),
        vec![Property::new("a", 1i64)],
    );
    let executor = Executor::with_config(Arc::new(store), &config);

    assert_eq!(
        body(executor.execute(Command::ListKinds {
            namespace: "default".into()
        })),
        r#"{"kinds":["Player","Item"]}"#
    );
    assert_eq!(
        body(executor.execute(Command::GetProperties {
            namespace: "default".into(),
            kind: "Player".into(),
        })),
        r#"{"properties":["ID/Name","a","b"]}"#
    );
}

#[test]
fn default_config_file_is_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dsview.toml");

    DsviewConfig::write_default_if_missing(&path).unwrap();
    let config = DsviewConfig::from_file(&path).unwrap();
    assert!(config.store_mode().has_metadata());
    assert_eq!(config.port, "8080");
}
