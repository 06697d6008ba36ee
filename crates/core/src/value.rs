//! Value types for dsview
//!
//! This module defines both sides of the property codec:
//! - [`RawValue`] / [`Property`]: what the external store client hands over
//! - [`PropertyValue`] / [`PropertyMap`]: the decoded, JSON-friendly form
//!
//! ## Decoded Value Model
//!
//! [`PropertyValue`] is a closed tagged union with four variants:
//! - `Scalar`: opaque store scalar, passed through unchanged
//! - `KeyReference`: canonical textual rendering of a foreign key
//! - `NestedEntity`: recursively decoded property map (no identity field)
//! - `List`: ordered sequence of decoded values
//!
//! It serializes untagged, so a decoded entity is plain JSON.

use crate::types::Key;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Scalar property value as stored
///
/// Scalar semantics belong to the store; this core only renders them.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes (rendered as standard base64)
    Bytes(Vec<u8>),
    /// Point in time (rendered as RFC 3339, UTC)
    Timestamp(DateTime<Utc>),
    /// Geographic point (rendered as `{"Lat":..,"Lng":..}`)
    GeoPoint {
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees
        lng: f64,
    },
}

impl Scalar {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "Null",
            Scalar::Bool(_) => "Bool",
            Scalar::Int(_) => "Int",
            Scalar::Float(_) => "Float",
            Scalar::String(_) => "String",
            Scalar::Bytes(_) => "Bytes",
            Scalar::Timestamp(_) => "Timestamp",
            Scalar::GeoPoint { .. } => "GeoPoint",
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Bytes(b) => serializer.serialize_str(&BASE64_STANDARD.encode(b)),
            Scalar::Timestamp(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Scalar::GeoPoint { lat, lng } => {
                let mut point = serializer.serialize_struct("GeoPoint", 2)?;
                point.serialize_field("Lat", lat)?;
                point.serialize_field("Lng", lng)?;
                point.end()
            }
        }
    }
}

/// Raw property value returned by the store client
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Scalar value
    Scalar(Scalar),
    /// Reference to another entity
    Key(Key),
    /// Embedded entity
    Entity(RawEntity),
    /// Multi-valued property
    List(Vec<RawValue>),
}

impl RawValue {
    /// Build an embedded entity value without a key
    pub fn entity(properties: Vec<Property>) -> Self {
        RawValue::Entity(RawEntity {
            key: None,
            properties,
        })
    }

    /// Null value
    pub fn null() -> Self {
        RawValue::Scalar(Scalar::Null)
    }
}

impl From<Scalar> for RawValue {
    fn from(s: Scalar) -> Self {
        RawValue::Scalar(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Scalar(Scalar::Int(i))
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Scalar(Scalar::Float(f))
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Scalar(Scalar::String(s))
    }
}

impl From<Key> for RawValue {
    fn from(k: Key) -> Self {
        RawValue::Key(k)
    }
}

impl From<RawEntity> for RawValue {
    fn from(e: RawEntity) -> Self {
        RawValue::Entity(e)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(v: Vec<RawValue>) -> Self {
        RawValue::List(v)
    }
}

/// Embedded entity as returned by the store
///
/// Embedded entities may carry a key; it is not rendered, since identity is
/// assigned only to top-level records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawEntity {
    /// Optional key of the embedded entity
    pub key: Option<Key>,
    /// Properties of the embedded entity
    pub properties: Vec<Property>,
}

/// One named property of a raw record
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name
    pub name: String,
    /// Raw value
    pub value: RawValue,
}

impl Property {
    /// Create a property
    pub fn new(name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decoded property map; ordered for deterministic JSON output
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Decoded property value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Scalar passed through unchanged
    Scalar(Scalar),
    /// Textual rendering of a foreign key (`/Kind,value/...`)
    KeyReference(String),
    /// Recursively decoded embedded entity
    NestedEntity(PropertyMap),
    /// Ordered sequence of decoded values
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Scalar(s) => s.type_name(),
            PropertyValue::KeyReference(_) => "KeyReference",
            PropertyValue::NestedEntity(_) => "NestedEntity",
            PropertyValue::List(_) => "List",
        }
    }

    /// Get as scalar if this is a scalar
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            PropertyValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get as key reference if this is a key reference
    pub fn as_key_reference(&self) -> Option<&str> {
        match self {
            PropertyValue::KeyReference(k) => Some(k),
            _ => None,
        }
    }

    /// Get as nested map if this is a nested entity
    pub fn as_nested(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::NestedEntity(m) => Some(m),
            _ => None,
        }
    }

    /// Get as list if this is a list
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(l) => Some(l),
            _ => None,
        }
    }
}
