//! dsview - data-access core of a datastore browser
//!
//! dsview reads entities from a hierarchical key-value entity store, turns
//! them into JSON for display, derives per-kind property lists, and deletes
//! entities named by textual key paths such as `/Player,7/Item,3`.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use dsview::{Command, Executor, Key, MemoryDatastore, Namespace, Property, StoreMode};
//!
//! let store = MemoryDatastore::new();
//! store.put(
//!     &Namespace::default(),
//!     Key::name_key("Player", "alice", None).unwrap(),
//!     vec![Property::new("Score", 10i64)],
//! );
//! let executor = Executor::new(Arc::new(store), StoreMode::Datastore);
//!
//! let body = executor
//!     .execute(Command::GetProperties {
//!         namespace: "default".into(),
//!         kind: "Player".into(),
//!     })
//!     .unwrap()
//!     .to_json_string()
//!     .unwrap();
//! assert_eq!(body, r#"{"properties":["ID/Name","Score"]}"#);
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`] which provides a command-based API.
//! The store itself sits behind the [`Datastore`] trait; the HTTP layer and the
//! real store client live outside this crate.

// Re-export the public API from dsview-executor
pub use dsview_executor::*;

// Value types needed to implement or seed a store
pub use dsview_core::{
    Batch, Entity, Key, KeyId, KeyPath, Limits, Namespace, Property, PropertyMetadata, RawEntity,
    RawValue, Scalar, IDENTITY_FIELD,
};
pub use dsview_engine::{Query, RawRecord, RecordStream, StoreResult};
