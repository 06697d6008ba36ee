//! Property tree codec
//!
//! Turns a store record's raw property list into a [`PropertyMap`]:
//! - key values become their canonical textual rendering (see [`render_key`])
//! - embedded entities are decoded recursively into a fresh map, without an
//!   identity field
//! - everything else passes through unchanged
//!
//! When a record repeats a property name, the last occurrence wins.

use crate::limits::Limits;
use crate::types::Key;
use crate::value::{Property, PropertyMap, PropertyValue, RawValue};
use thiserror::Error;

/// Errors raised while decoding a record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Embedded entities or lists nest deeper than allowed
    #[error("property '{property}' nests deeper than {max} levels")]
    NestingTooDeep {
        /// Top-level property whose value is too deep
        property: String,
        /// Maximum allowed depth
        max: usize,
    },
}

/// Render a key in its canonical textual form
///
/// This is the encode side of the key-path contract: the output is exactly
/// what [`KeyPath::parse`](crate::key_path::KeyPath::parse) reads back.
pub fn render_key(key: &Key) -> String {
    key.to_string()
}

/// Decode a raw property list into `dst` using default limits
///
/// Returns the destination map so calls can be chained.
///
/// # Examples
///
/// ```
/// use dsview_core::codec::decode_properties;
/// use dsview_core::{Property, PropertyMap, RawValue};
///
/// let props = vec![
///     Property::new("Score", 42i64),
///     Property::new("Address", RawValue::entity(vec![Property::new("Street", "Main")])),
/// ];
/// let mut map = PropertyMap::new();
/// decode_properties(props, &mut map).unwrap();
///
/// let json = serde_json::to_value(&map).unwrap();
/// assert_eq!(json, serde_json::json!({"Score": 42, "Address": {"Street": "Main"}}));
/// ```
pub fn decode_properties<I>(props: I, dst: &mut PropertyMap) -> Result<&mut PropertyMap, CodecError>
where
    I: IntoIterator<Item = Property>,
{
    decode_properties_with_limits(props, dst, &Limits::default())
}

/// Decode a raw property list into `dst` with custom limits
pub fn decode_properties_with_limits<'a, I>(
    props: I,
    dst: &'a mut PropertyMap,
    limits: &Limits,
) -> Result<&'a mut PropertyMap, CodecError>
where
    I: IntoIterator<Item = Property>,
{
    for prop in props {
        let value = decode_value(prop.value, 0, limits).ok_or_else(|| {
            CodecError::NestingTooDeep {
                property: prop.name.clone(),
                max: limits.max_nesting_depth,
            }
        })?;
        dst.insert(prop.name, value);
    }
    Ok(dst)
}

/// Decode one raw value; `None` when the nesting limit is exceeded
fn decode_value(value: RawValue, depth: usize, limits: &Limits) -> Option<PropertyValue> {
    match value {
        RawValue::Scalar(s) => Some(PropertyValue::Scalar(s)),
        RawValue::Key(k) => Some(PropertyValue::KeyReference(render_key(&k))),
        RawValue::Entity(entity) => {
            if depth >= limits.max_nesting_depth {
                return None;
            }
            let mut nested = PropertyMap::new();
            for prop in entity.properties {
                let decoded = decode_value(prop.value, depth + 1, limits)?;
                nested.insert(prop.name, decoded);
            }
            Some(PropertyValue::NestedEntity(nested))
        }
        RawValue::List(items) => {
            if depth >= limits.max_nesting_depth {
                return None;
            }
            items
                .into_iter()
                .map(|item| decode_value(item, depth + 1, limits))
                .collect::<Option<Vec<_>>>()
                .map(PropertyValue::List)
        }
    }
}
