//! Core types for dsview
//!
//! This crate is the data-access core of the dsview browser:
//! - Key, KeySegment, KeyId, Namespace: ancestor-qualified entity identity
//! - Value types: raw store values and their decoded, JSON-friendly form
//! - Codec: recursive decoding of raw property lists
//! - Accumulator: request-local, deduplicated entity batches
//! - KeyPath: parsing textual key paths back into keys for deletion
//! - Schema: property-name inference for a kind
//! - Limits and Error: validation bounds and the error hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accumulator;
pub mod codec;
pub mod error;
pub mod key;
pub mod key_path;
pub mod limits;
pub mod schema;
pub mod types;
pub mod value;

pub use accumulator::{Batch, Entity, EntityAccumulator, IDENTITY_FIELD};
pub use codec::{decode_properties, render_key, CodecError};
pub use error::{Error, Result};
pub use key::KeyError;
pub use key_path::{reconstruct_delete_keys, KeyPath, KeyPathError, MalformedKeyPath, PathSegment};
pub use limits::Limits;
pub use schema::{merge_entity_properties, merge_metadata_properties, PropertyMetadata};
pub use types::{Key, KeyId, KeySegment, Namespace, DEFAULT_NAMESPACE_LABEL};
pub use value::{Property, PropertyMap, PropertyValue, RawEntity, RawValue, Scalar};
