//! Property schema merger
//!
//! Derives the property list shown for a kind. The list always starts with
//! [`IDENTITY_FIELD`]; the remaining names are distinct and sorted ascending.
//!
//! Two sources are supported:
//! - sampled entities ([`merge_entity_properties`]), used when the store has
//!   no metadata queries
//! - property metadata rows ([`merge_metadata_properties`]), whose names may
//!   carry a `.suffix` for fields of embedded entities

use crate::accumulator::{Entity, IDENTITY_FIELD};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the store's property metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyMetadata {
    /// Kind the property belongs to
    pub kind: String,
    /// Property name, possibly `parent.child` for embedded fields
    pub name: String,
}

impl PropertyMetadata {
    /// Create a metadata row
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        PropertyMetadata {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Name up to the first `.`
    pub fn top_level_name(&self) -> &str {
        match self.name.find('.') {
            Some(i) => &self.name[..i],
            None => &self.name,
        }
    }
}

/// Merge the property names of sampled entities
///
/// An empty sample yields only the identity label.
///
/// # Examples
///
/// ```
/// use dsview_core::schema::merge_entity_properties;
/// use dsview_core::{Entity, Key, Property};
///
/// let a = Entity::decode(&Key::id_key("P", 1, None).unwrap(), vec![Property::new("b", 1i64)]).unwrap();
/// let b = Entity::decode(&Key::id_key("P", 2, None).unwrap(), vec![Property::new("a", 1i64)]).unwrap();
/// assert_eq!(merge_entity_properties(&[a, b]), vec!["ID/Name", "a", "b"]);
/// ```
pub fn merge_entity_properties<'a, I>(entities: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let names: BTreeSet<&str> = entities
        .into_iter()
        .flat_map(|e| e.property_names())
        .collect();
    pin_identity(names.into_iter().map(str::to_string))
}

/// Merge property metadata rows for one kind
///
/// Rows of other kinds are ignored. Names are cut at the first `.` and
/// consecutive repeats collapsed (rows arrive ordered by kind, then name);
/// the result is then sorted and deduplicated.
pub fn merge_metadata_properties(kind: &str, rows: &[PropertyMetadata]) -> Vec<String> {
    let mut names: Vec<&str> = Vec::new();
    for row in rows.iter().filter(|r| r.kind == kind) {
        let name = row.top_level_name();
        if names.last() != Some(&name) {
            names.push(name);
        }
    }
    let sorted: BTreeSet<&str> = names.into_iter().collect();
    pin_identity(sorted.into_iter().map(str::to_string))
}

/// Prepend the identity label; `names` must already be sorted and distinct
fn pin_identity<I: Iterator<Item = String>>(names: I) -> Vec<String> {
    std::iter::once(IDENTITY_FIELD.to_string())
        .chain(names.filter(|n| n != IDENTITY_FIELD))
        .collect()
}
