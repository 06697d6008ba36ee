//! Entity accumulator
//!
//! Collects the records of one query into a [`Batch`]. Every record is decoded
//! through the [codec](crate::codec), stamped with its identity (the rendered
//! record key) and appended unless an entity with the same identity is already
//! in the batch.
//!
//! An accumulator belongs to exactly one request. It holds no shared state, so
//! concurrent requests each build their own batch.

use crate::codec::{decode_properties_with_limits, render_key, CodecError};
use crate::limits::Limits;
use crate::types::Key;
use crate::value::{Property, PropertyMap, PropertyValue};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;

/// Display label of the synthetic identity field
pub const IDENTITY_FIELD: &str = "ID/Name";

/// Decoded top-level entity
///
/// Serializes as a JSON object whose first field is [`IDENTITY_FIELD`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    identity: String,
    properties: PropertyMap,
}

impl Entity {
    /// Decode a record using default limits
    pub fn decode(key: &Key, props: Vec<Property>) -> Result<Self, CodecError> {
        Self::decode_with_limits(key, props, &Limits::default())
    }

    /// Decode a record with custom limits
    ///
    /// A raw property named like the identity field is dropped; the identity
    /// always reflects the record key.
    pub fn decode_with_limits(
        key: &Key,
        props: Vec<Property>,
        limits: &Limits,
    ) -> Result<Self, CodecError> {
        let identity = render_key(key);
        let mut properties = PropertyMap::new();
        decode_properties_with_limits(props, &mut properties, limits)?;
        if properties.remove(IDENTITY_FIELD).is_some() {
            warn!(
                target: "dsview::codec",
                identity = %identity,
                "Dropped property shadowing the identity field"
            );
        }
        Ok(Entity {
            identity,
            properties,
        })
    }

    /// Rendered key of this entity
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Decoded properties (identity excluded)
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Look up one decoded property
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Property names, identity excluded
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len() + 1))?;
        map.serialize_entry(IDENTITY_FIELD, &self.identity)?;
        for (name, value) in &self.properties {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Entities produced by one query, unique by identity, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Batch {
    entities: Vec<Entity>,
}

impl Batch {
    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over entities in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Entities as a slice
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Identities in batch order
    pub fn identities(&self) -> Vec<&str> {
        self.entities.iter().map(Entity::identity).collect()
    }

    /// Check if an entity with this identity is present
    pub fn contains_identity(&self, identity: &str) -> bool {
        self.entities.iter().any(|e| e.identity == identity)
    }

    /// Consume the batch
    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }
}

impl IntoIterator for Batch {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// Request-local collector of decoded entities
///
/// # Example
///
/// ```
/// use dsview_core::{EntityAccumulator, Key, Property};
///
/// let key = Key::id_key("Player", 7, None).unwrap();
/// let mut acc = EntityAccumulator::new();
/// acc.load(&key, vec![Property::new("Score", 42i64)]).unwrap();
/// acc.load(&key, vec![Property::new("Score", 43i64)]).unwrap();
///
/// let batch = acc.finish();
/// assert_eq!(batch.len(), 1);
/// assert_eq!(batch.identities(), vec!["/Player,7"]);
/// ```
#[derive(Debug, Default)]
pub struct EntityAccumulator {
    batch: Batch,
    limits: Limits,
    duplicates: usize,
}

impl EntityAccumulator {
    /// Create an empty accumulator with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty accumulator with custom limits
    pub fn with_limits(limits: Limits) -> Self {
        EntityAccumulator {
            batch: Batch::default(),
            limits,
            duplicates: 0,
        }
    }

    /// Decode one record and add it unless its identity is already present
    ///
    /// Returns `true` if the entity was retained, `false` if it was a duplicate.
    pub fn load(&mut self, key: &Key, props: Vec<Property>) -> Result<bool, CodecError> {
        let entity = Entity::decode_with_limits(key, props, &self.limits)?;
        if self.batch.contains_identity(entity.identity()) {
            self.duplicates += 1;
            return Ok(false);
        }
        self.batch.entities.push(entity);
        Ok(true)
    }

    /// Load every record of a sequence, stopping at the first decode error
    pub fn extend<I>(&mut self, records: I) -> Result<(), CodecError>
    where
        I: IntoIterator<Item = (Key, Vec<Property>)>,
    {
        for (key, props) in records {
            self.load(&key, props)?;
        }
        Ok(())
    }

    /// Number of entities retained so far
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    /// Check if nothing has been retained
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Number of records discarded as duplicates
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Finish accumulation and return the batch
    pub fn finish(self) -> Batch {
        self.batch
    }
}
