//! Core identity types: Key, KeySegment, KeyId, Namespace
//!
//! A [`Key`] is an ordered ancestor chain of [`KeySegment`]s, root first.
//! Each segment names a kind and carries either a positive numeric id or a
//! non-empty string name. Keys are immutable once built.
//!
//! The canonical textual form of a key is `/Kind,value/Kind,value`, produced
//! by `Display`. The key-path parser in [`crate::key_path`] reads it back.

use crate::key::{
    validate_depth_with_limits, validate_id, validate_kind_with_limits, validate_name_with_limits,
    KeyError,
};
use crate::limits::Limits;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one key segment: numeric id or string name
///
/// Ordering follows the store's key order: every id sorts before every
/// name, ids compare numerically and names lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyId {
    /// Store-allocated numeric id (strictly positive)
    Id(i64),
    /// Client-chosen string name (non-empty)
    Name(String),
}

impl KeyId {
    /// Numeric id, if this is an id
    pub fn as_id(&self) -> Option<i64> {
        match self {
            KeyId::Id(id) => Some(*id),
            KeyId::Name(_) => None,
        }
    }

    /// Name, if this is a name
    pub fn as_name(&self) -> Option<&str> {
        match self {
            KeyId::Id(_) => None,
            KeyId::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyId::Id(id) => write!(f, "{}", id),
            KeyId::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for KeyId {
    fn from(id: i64) -> Self {
        KeyId::Id(id)
    }
}

impl From<&str> for KeyId {
    fn from(name: &str) -> Self {
        KeyId::Name(name.to_string())
    }
}

impl From<String> for KeyId {
    fn from(name: String) -> Self {
        KeyId::Name(name)
    }
}

/// One `kind,id-or-name` element of an ancestor chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeySegment {
    kind: String,
    id: KeyId,
}

impl KeySegment {
    /// Create a segment. Validation happens when segments are assembled into a [`Key`].
    pub fn new(kind: impl Into<String>, id: impl Into<KeyId>) -> Self {
        KeySegment {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Kind of this segment
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Id or name of this segment
    pub fn id_or_name(&self) -> &KeyId {
        &self.id
    }

    fn validate(&self, limits: &Limits) -> Result<(), KeyError> {
        validate_kind_with_limits(&self.kind, limits)?;
        match &self.id {
            KeyId::Id(id) => validate_id(*id),
            KeyId::Name(name) => validate_name_with_limits(name, limits),
        }
    }
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{},{}", self.kind, self.id)
    }
}

/// Composite, ancestor-qualified entity key
///
/// Two keys are equal iff every segment's kind and id-or-name match in order.
/// The derived ordering sorts a strict ancestor before all of its descendants,
/// which is the order of a query sorted by `__key__`.
///
/// # Examples
///
/// ```
/// use dsview_core::Key;
///
/// let player = Key::id_key("Player", 7, None).unwrap();
/// let item = Key::id_key("Item", 3, Some(&player)).unwrap();
///
/// assert_eq!(item.to_string(), "/Player,7/Item,3");
/// assert_eq!(item.parent(), Some(player.clone()));
/// assert!(player.is_ancestor_of(&item));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Key {
    segments: Vec<KeySegment>,
}

impl Key {
    /// Create a key with a numeric id under an optional parent
    pub fn id_key(
        kind: impl Into<String>,
        id: i64,
        parent: Option<&Key>,
    ) -> Result<Self, KeyError> {
        Self::new(kind, KeyId::Id(id), parent)
    }

    /// Create a key with a string name under an optional parent
    pub fn name_key(
        kind: impl Into<String>,
        name: impl Into<String>,
        parent: Option<&Key>,
    ) -> Result<Self, KeyError> {
        Self::new(kind, KeyId::Name(name.into()), parent)
    }

    /// Create a key from a kind and id-or-name under an optional parent
    pub fn new(
        kind: impl Into<String>,
        id: impl Into<KeyId>,
        parent: Option<&Key>,
    ) -> Result<Self, KeyError> {
        let mut segments = parent.map(|p| p.segments.clone()).unwrap_or_default();
        segments.push(KeySegment::new(kind, id));
        Self::from_segments(segments)
    }

    /// Create a key from root-first segments using default limits
    pub fn from_segments(segments: Vec<KeySegment>) -> Result<Self, KeyError> {
        Self::from_segments_with_limits(segments, &Limits::default())
    }

    /// Create a key from root-first segments with custom limits
    pub fn from_segments_with_limits(
        segments: Vec<KeySegment>,
        limits: &Limits,
    ) -> Result<Self, KeyError> {
        validate_depth_with_limits(segments.len(), limits)?;
        for segment in &segments {
            segment.validate(limits)?;
        }
        Ok(Key { segments })
    }

    /// Create a child key of this key
    pub fn child(&self, kind: impl Into<String>, id: impl Into<KeyId>) -> Result<Self, KeyError> {
        Self::new(kind, id, Some(self))
    }

    /// All segments, root first
    pub fn segments(&self) -> &[KeySegment] {
        &self.segments
    }

    /// Number of segments in the ancestor chain
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    fn leaf(&self) -> &KeySegment {
        // Construction guarantees at least one segment.
        &self.segments[self.segments.len() - 1]
    }

    /// Kind of the entity this key identifies
    pub fn kind(&self) -> &str {
        self.leaf().kind()
    }

    /// Id or name of the entity this key identifies
    pub fn id_or_name(&self) -> &KeyId {
        self.leaf().id_or_name()
    }

    /// Numeric id, if the leaf segment has one
    pub fn id(&self) -> Option<i64> {
        self.id_or_name().as_id()
    }

    /// Name, if the leaf segment has one
    pub fn name(&self) -> Option<&str> {
        self.id_or_name().as_name()
    }

    /// Parent key (None for root keys)
    pub fn parent(&self) -> Option<Key> {
        if self.segments.len() <= 1 {
            None
        } else {
            Some(Key {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Root ancestor of this key (the key itself for root keys)
    pub fn root(&self) -> Key {
        Key {
            segments: self.segments[..1].to_vec(),
        }
    }

    /// Check if this key has no parent
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Check if this key is an ancestor of another (or equal)
    pub fn is_ancestor_of(&self, other: &Key) -> bool {
        other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Display label of the store's default (empty) namespace
pub const DEFAULT_NAMESPACE_LABEL: &str = "default";

/// Top-level partition of kinds and entities
///
/// Wraps the store's namespace string. The default namespace is the empty
/// string in the store and is shown to clients as `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Create a namespace from the store's namespace string
    pub fn new(name: impl Into<String>) -> Self {
        Namespace(name.into())
    }

    /// Create a namespace from its display label (`default` maps to the empty namespace)
    pub fn from_display(label: &str) -> Self {
        if label == DEFAULT_NAMESPACE_LABEL {
            Namespace::default()
        } else {
            Namespace(label.to_string())
        }
    }

    /// The store's namespace string (empty for the default namespace)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the default namespace
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Label shown to clients
    pub fn display_name(&self) -> &str {
        if self.is_default() {
            DEFAULT_NAMESPACE_LABEL
        } else {
            &self.0
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
