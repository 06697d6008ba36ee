//! Common test utilities for browser tests

use std::sync::Arc;

use dsview::{Key, MemoryDatastore, Namespace, Property, RawValue};

/// Store holding a small game dataset in the default namespace.
pub fn game_store() -> Arc<MemoryDatastore> {
    let store = MemoryDatastore::new();
    let ns = Namespace::default();
    let p7 = Key::id_key("Player", 7, None).unwrap();
    store.put(
        &ns,
        p7.clone(),
        vec![
            Property::new("Score", 42i64),
            Property::new(
                "Address",
                RawValue::entity(vec![Property::new("Street", "Main")]),
            ),
        ],
    );
    store.put(
        &ns,
        Key::name_key("Player", "alice", None).unwrap(),
        vec![Property::new("Score", 10i64)],
    );
    store.put(
        &ns,
        p7.child("Item", 3i64).unwrap(),
        vec![Property::new("Name", "sword")],
    );
    Arc::new(store)
}

/// Render an output to its wire body.
pub fn body(output: dsview::Result<dsview::Output>) -> String {
    output.unwrap().to_json_string().unwrap()
}
