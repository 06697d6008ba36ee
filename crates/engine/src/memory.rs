//! In-memory store
//!
//! Reference [`Datastore`] used by tests and local development. Entities are
//! kept per namespace in key order, so key-ordered queries are a plain scan.
//! Metadata is derived from the stored data; fields of embedded entities are
//! reported as `parent.child`, the way the store's `__property__` kind does.

use crate::store::{Datastore, Query, RawRecord, RecordStream, StoreError, StoreResult};
use dsview_core::{Key, Namespace, Property, PropertyMetadata, RawValue};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

type Entities = BTreeMap<Namespace, BTreeMap<Key, Vec<Property>>>;

/// In-memory [`Datastore`]
///
/// # Thread Safety
///
/// Interior state sits behind a `parking_lot::RwLock`; the store can be
/// shared across request threads.
#[derive(Debug)]
pub struct MemoryDatastore {
    entities: RwLock<Entities>,
    metadata: bool,
}

impl Default for MemoryDatastore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDatastore {
    /// Create an empty store with metadata queries enabled
    pub fn new() -> Self {
        MemoryDatastore {
            entities: RwLock::new(BTreeMap::new()),
            metadata: true,
        }
    }

    /// Disable metadata queries (they fail with `Unsupported`)
    pub fn without_metadata(mut self) -> Self {
        self.metadata = false;
        self
    }

    /// Insert or replace an entity
    pub fn put(&self, namespace: &Namespace, key: Key, properties: Vec<Property>) {
        self.entities
            .write()
            .entry(namespace.clone())
            .or_default()
            .insert(key, properties);
    }

    /// Check if an entity exists
    pub fn contains(&self, namespace: &Namespace, key: &Key) -> bool {
        self.entities
            .read()
            .get(namespace)
            .map_or(false, |m| m.contains_key(key))
    }

    /// Number of entities in a namespace
    pub fn len(&self, namespace: &Namespace) -> usize {
        self.entities.read().get(namespace).map_or(0, BTreeMap::len)
    }

    /// Check if a namespace holds no entities
    pub fn is_empty(&self, namespace: &Namespace) -> bool {
        self.len(namespace) == 0
    }

    fn require_metadata(&self, operation: &str) -> StoreResult<()> {
        if self.metadata {
            Ok(())
        } else {
            Err(StoreError::unsupported(operation))
        }
    }
}

impl Datastore for MemoryDatastore {
    fn run_query(&self, query: &Query) -> StoreResult<RecordStream<'_>> {
        let entities = self.entities.read();
        let limit = query.result_limit().unwrap_or(usize::MAX);
        let records: Vec<RawRecord> = entities
            .get(query.namespace())
            .into_iter()
            .flat_map(|m| m.iter())
            .filter(|(key, _)| key.kind() == query.kind_name())
            .take(limit)
            .map(|(key, props)| RawRecord::new(key.clone(), props.clone()))
            .collect();
        debug!(
            target: "dsview::store",
            namespace = %query.namespace(),
            kind = query.kind_name(),
            records = records.len(),
            "Query executed"
        );
        Ok(Box::new(records.into_iter().map(Ok)))
    }

    fn delete(&self, namespace: &Namespace, keys: &[Key]) -> StoreResult<()> {
        let mut entities = self.entities.write();
        let mut removed = 0usize;
        if let Some(m) = entities.get_mut(namespace) {
            for key in keys {
                if m.remove(key).is_some() {
                    removed += 1;
                }
            }
            if m.is_empty() {
                entities.remove(namespace);
            }
        }
        debug!(
            target: "dsview::store",
            namespace = %namespace,
            requested = keys.len(),
            removed,
            "Delete applied"
        );
        Ok(())
    }

    /// The default namespace is always listed first, even when empty.
    fn namespaces(&self) -> StoreResult<Vec<Namespace>> {
        self.require_metadata("__namespace__")?;
        let entities = self.entities.read();
        let mut namespaces = vec![Namespace::default()];
        namespaces.extend(entities.keys().filter(|ns| !ns.is_default()).cloned());
        Ok(namespaces)
    }

    fn kinds(&self, namespace: &Namespace) -> StoreResult<Vec<String>> {
        self.require_metadata("__kind__")?;
        let entities = self.entities.read();
        let kinds: BTreeSet<&str> = entities
            .get(namespace)
            .into_iter()
            .flat_map(|m| m.keys())
            .map(Key::kind)
            .collect();
        Ok(kinds.into_iter().map(str::to_string).collect())
    }

    fn property_metadata(&self, namespace: &Namespace) -> StoreResult<Vec<PropertyMetadata>> {
        self.require_metadata("__property__")?;
        let entities = self.entities.read();
        let mut rows = BTreeSet::new();
        for (key, props) in entities.get(namespace).into_iter().flat_map(|m| m.iter()) {
            for prop in props {
                collect_property_names(key.kind(), &prop.name, &prop.value, &mut rows);
            }
        }
        Ok(rows.into_iter().collect())
    }
}

fn collect_property_names(
    kind: &str,
    name: &str,
    value: &RawValue,
    rows: &mut BTreeSet<PropertyMetadata>,
) {
    match value {
        RawValue::Entity(entity) if !entity.properties.is_empty() => {
            for inner in &entity.properties {
                let path = format!("{}.{}", name, inner.name);
                collect_property_names(kind, &path, &inner.value, rows);
            }
        }
        RawValue::List(items) if items.iter().any(|v| matches!(v, RawValue::Entity(_))) => {
            for item in items {
                collect_property_names(kind, name, item, rows);
            }
        }
        _ => {
            rows.insert(PropertyMetadata::new(kind, name));
        }
    }
}
