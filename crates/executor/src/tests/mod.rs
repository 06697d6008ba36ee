//! Test modules for the executor crate.

pub mod delete;

use std::sync::Arc;

use dsview_core::{Key, Namespace, Property, PropertyMetadata, RawValue};
use dsview_engine::{
    Datastore, MemoryDatastore, Query, RawRecord, RecordStream, StoreError, StoreMode,
    StoreResult,
};
use parking_lot::Mutex;

use crate::Executor;

pub(crate) fn player(id: i64) -> Key {
    Key::id_key("Player", id, None).unwrap()
}

/// Store with a few players and items in the default namespace and one
/// tenant namespace.
pub(crate) fn seeded_store() -> Arc<MemoryDatastore> {
    let store = MemoryDatastore::new();
    seed(&store);
    Arc::new(store)
}

pub(crate) fn seed(store: &MemoryDatastore) {
    let ns = Namespace::default();
    store.put(
        &ns,
        player(7),
        vec![
            Property::new("Score", 42i64),
            Property::new(
                "Address",
                RawValue::entity(vec![Property::new("Street", "Main")]),
            ),
        ],
    );
    store.put(&ns, player(2), vec![Property::new("Alias", "bob")]);
    store.put(
        &ns,
        Key::name_key("Player", "alice", None).unwrap(),
        vec![Property::new("Score", 10i64)],
    );
    store.put(
        &ns,
        player(7).child("Item", 3i64).unwrap(),
        vec![Property::new("Weight", 1.5f64)],
    );
    store.put(
        &Namespace::new("tenant"),
        Key::name_key("Invoice", "inv-1", None).unwrap(),
        vec![Property::new("Total", 99i64)],
    );
}

pub(crate) fn datastore_executor(store: Arc<MemoryDatastore>) -> Executor {
    Executor::new(store, StoreMode::Datastore)
}

/// Store whose every call fails.
pub(crate) struct FailingStore;

impl Datastore for FailingStore {
    fn run_query(&self, _query: &Query) -> StoreResult<RecordStream<'_>> {
        Err(StoreError::Unavailable {
            reason: "connection refused".into(),
        })
    }

    fn delete(&self, _namespace: &Namespace, _keys: &[Key]) -> StoreResult<()> {
        Err(StoreError::delete("permission denied"))
    }

    fn namespaces(&self) -> StoreResult<Vec<Namespace>> {
        Err(StoreError::Metadata {
            reason: "timeout".into(),
        })
    }

    fn kinds(&self, _namespace: &Namespace) -> StoreResult<Vec<String>> {
        Err(StoreError::Metadata {
            reason: "timeout".into(),
        })
    }

    fn property_metadata(&self, _namespace: &Namespace) -> StoreResult<Vec<PropertyMetadata>> {
        Err(StoreError::Metadata {
            reason: "timeout".into(),
        })
    }
}

/// Store whose query stream yields one record and then fails.
pub(crate) struct BrokenStreamStore;

impl Datastore for BrokenStreamStore {
    fn run_query(&self, _query: &Query) -> StoreResult<RecordStream<'_>> {
        let first = RawRecord::new(player(1), vec![Property::new("Score", 1i64)]);
        let records = vec![Ok(first), Err(StoreError::query("stream reset"))];
        Ok(Box::new(records.into_iter()))
    }

    fn delete(&self, _namespace: &Namespace, _keys: &[Key]) -> StoreResult<()> {
        Ok(())
    }

    fn namespaces(&self) -> StoreResult<Vec<Namespace>> {
        Ok(vec![Namespace::default()])
    }

    fn kinds(&self, _namespace: &Namespace) -> StoreResult<Vec<String>> {
        Ok(vec!["Player".into()])
    }

    fn property_metadata(&self, _namespace: &Namespace) -> StoreResult<Vec<PropertyMetadata>> {
        Ok(Vec::new())
    }
}

/// Memory store that records every delete call.
pub(crate) struct RecordingStore {
    pub inner: MemoryDatastore,
    pub deletes: Mutex<Vec<(Namespace, Vec<Key>)>>,
}

impl RecordingStore {
    pub fn new(inner: MemoryDatastore) -> Self {
        Self {
            inner,
            deletes: Mutex::new(Vec::new()),
        }
    }
}

impl Datastore for RecordingStore {
    fn run_query(&self, query: &Query) -> StoreResult<RecordStream<'_>> {
        self.inner.run_query(query)
    }

    fn delete(&self, namespace: &Namespace, keys: &[Key]) -> StoreResult<()> {
        self.deletes.lock().push((namespace.clone(), keys.to_vec()));
        self.inner.delete(namespace, keys)
    }

    fn namespaces(&self) -> StoreResult<Vec<Namespace>> {
        self.inner.namespaces()
    }

    fn kinds(&self, namespace: &Namespace) -> StoreResult<Vec<String>> {
        self.inner.kinds(namespace)
    }

    fn property_metadata(&self, namespace: &Namespace) -> StoreResult<Vec<PropertyMetadata>> {
        self.inner.property_metadata(namespace)
    }
}
