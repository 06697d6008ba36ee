//! Key-path parser and reconstructor
//!
//! Reads the textual key paths produced by [`render_key`](crate::codec::render_key)
//! back into keys. A path has the grammar
//!
//! ```text
//! path    := ("/" segment)+
//! segment := kind "," value
//! ```
//!
//! The value after the first `,` is either a numeric id or a name. The text
//! alone cannot always tell which: `/Player,7` was rendered from either
//! `Player(id=7)` or `Player(name="7")`.
//!
//! # Interpretations
//!
//! | Raw value | Primary reading | Also tried for deletes |
//! |-----------|-----------------|------------------------|
//! | `7` | id 7 | name `"7"` |
//! | `007`, `+7` | name | id 7 |
//! | `0`, `-3`, `alice` | name | nothing |
//!
//! The primary reading re-renders to the exact input text, so
//! `render(primary_key(parse(P))) == P` for every well-formed path.
//! [`KeyPath::delete_candidates`] expands every combination of readings;
//! deleting a candidate that does not exist is a no-op in the store.

use crate::key::{validate_kind_with_limits, validate_name_with_limits, KeyError};
use crate::limits::Limits;
use crate::types::{Key, KeyId, KeySegment};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a textual key path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyPathError {
    /// Input is empty
    #[error("key path is empty")]
    Empty,
    /// Input does not start with `/`
    #[error("key path must start with '/'")]
    MissingLeadingSlash,
    /// Two consecutive `/` or a trailing `/`
    #[error("empty segment at position {position}")]
    EmptySegment {
        /// Zero-based segment index
        position: usize,
    },
    /// Segment has no `,` between kind and value
    #[error("segment '{segment}' at position {position} has no ',' delimiter")]
    MissingDelimiter {
        /// Zero-based segment index
        position: usize,
        /// Offending segment text
        segment: String,
    },
    /// Segment has nothing before the `,`
    #[error("empty kind at position {position}")]
    EmptyKind {
        /// Zero-based segment index
        position: usize,
    },
    /// Segment has nothing after the `,`
    #[error("empty id or name at position {position}")]
    EmptyValue {
        /// Zero-based segment index
        position: usize,
    },
    /// More segments than the maximum ancestor depth
    #[error("key path has {actual} segments, maximum is {max}")]
    TooDeep {
        /// Number of segments in the input
        actual: usize,
        /// Maximum allowed segments
        max: usize,
    },
    /// More id-or-name segments than the candidate expansion allows
    #[error("key path has {actual} ambiguous id-or-name segments, maximum is {max}")]
    TooAmbiguous {
        /// Number of ambiguous segments
        actual: usize,
        /// Maximum allowed
        max: usize,
    },
    /// Segment violates key validation rules
    #[error("invalid segment at position {position}: {source}")]
    InvalidSegment {
        /// Zero-based segment index
        position: usize,
        /// Underlying validation error
        source: KeyError,
    },
    /// Reconstructed key violates key validation rules
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),
}

impl KeyPathError {
    /// Get the reason code reported to clients
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyPathError::Empty => "empty_path",
            KeyPathError::MissingLeadingSlash => "missing_leading_slash",
            KeyPathError::EmptySegment { .. } => "empty_segment",
            KeyPathError::MissingDelimiter { .. } => "missing_delimiter",
            KeyPathError::EmptyKind { .. } => "empty_kind",
            KeyPathError::EmptyValue { .. } => "empty_value",
            KeyPathError::TooDeep { .. } => "path_too_deep",
            KeyPathError::TooAmbiguous { .. } => "path_too_ambiguous",
            KeyPathError::InvalidSegment { source, .. } => source.reason_code(),
            KeyPathError::InvalidKey(source) => source.reason_code(),
        }
    }
}

/// One parsed `kind,value` segment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    kind: String,
    raw: String,
    numeric: Option<i64>,
}

impl PathSegment {
    fn new(kind: &str, raw: &str) -> Self {
        let numeric = raw.parse::<i64>().ok().filter(|id| *id > 0);
        PathSegment {
            kind: kind.to_string(),
            raw: raw.to_string(),
            numeric,
        }
    }

    /// Kind of this segment
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Raw id-or-name text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Positive integer the raw text parses to, if any
    pub fn numeric(&self) -> Option<i64> {
        self.numeric
    }

    /// Check if the raw text reads both as an id and as a name
    pub fn is_ambiguous(&self) -> bool {
        self.numeric.is_some()
    }

    /// Reading that re-renders to the raw text
    ///
    /// An id only when the raw text is the canonical decimal form of a
    /// positive integer; a name otherwise.
    pub fn primary(&self) -> KeyId {
        match self.numeric {
            Some(id) if id.to_string() == self.raw => KeyId::Id(id),
            _ => KeyId::Name(self.raw.clone()),
        }
    }

    /// All readings, primary first
    pub fn readings(&self) -> Vec<KeyId> {
        let primary = self.primary();
        match (self.numeric, &primary) {
            (Some(_), KeyId::Id(_)) => vec![primary, KeyId::Name(self.raw.clone())],
            (Some(id), KeyId::Name(_)) => vec![primary, KeyId::Id(id)],
            (None, _) => vec![primary],
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{},{}", self.kind, self.raw)
    }
}

/// Parsed textual key path
///
/// # Examples
///
/// ```
/// use dsview_core::KeyPath;
///
/// let path: KeyPath = "/Player,7/Item,3".parse().unwrap();
/// let key = path.primary_key();
/// assert_eq!(key.kind(), "Item");
/// assert_eq!(key.id(), Some(3));
/// assert_eq!(key.parent().unwrap().id(), Some(7));
///
/// let named: KeyPath = "/Player,alice".parse().unwrap();
/// assert_eq!(named.delete_candidates().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
    primary: Key,
    limits: Limits,
}

impl KeyPath {
    /// Parse a key path using default limits
    pub fn parse(input: &str) -> Result<Self, KeyPathError> {
        Self::parse_with_limits(input, &Limits::default())
    }

    /// Parse a key path with custom limits
    pub fn parse_with_limits(input: &str, limits: &Limits) -> Result<Self, KeyPathError> {
        if input.is_empty() {
            return Err(KeyPathError::Empty);
        }
        let body = input
            .strip_prefix('/')
            .ok_or(KeyPathError::MissingLeadingSlash)?;

        let tokens: Vec<&str> = body.split('/').collect();
        if tokens.len() > limits.max_path_depth {
            return Err(KeyPathError::TooDeep {
                actual: tokens.len(),
                max: limits.max_path_depth,
            });
        }

        let mut segments = Vec::with_capacity(tokens.len());
        for (position, token) in tokens.into_iter().enumerate() {
            segments.push(parse_segment(position, token, limits)?);
        }

        let ambiguous = segments.iter().filter(|s| s.is_ambiguous()).count();
        if ambiguous > limits.max_ambiguous_segments {
            return Err(KeyPathError::TooAmbiguous {
                actual: ambiguous,
                max: limits.max_ambiguous_segments,
            });
        }

        let primary = Key::from_segments_with_limits(
            segments
                .iter()
                .map(|s| KeySegment::new(s.kind.clone(), s.primary()))
                .collect(),
            limits,
        )?;

        Ok(KeyPath {
            segments,
            primary,
            limits: limits.clone(),
        })
    }

    /// Parsed segments, root first
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a parsed path has at least one segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments that read both as id and as name
    pub fn ambiguous_segments(&self) -> usize {
        self.segments.iter().filter(|s| s.is_ambiguous()).count()
    }

    /// Best-guess key; re-renders to the parsed text
    pub fn primary_key(&self) -> &Key {
        &self.primary
    }

    /// Every id/name combination of this path, primary key first
    ///
    /// Produces `2^n` keys for `n` ambiguous segments. Each candidate shares
    /// its ancestor readings with the chain it was expanded from, so parents
    /// are always fully reconstructed keys.
    pub fn delete_candidates(&self) -> Result<Vec<Key>, KeyPathError> {
        let mut chains: Vec<Vec<KeySegment>> = vec![Vec::with_capacity(self.segments.len())];
        for segment in &self.segments {
            let readings = segment.readings();
            let mut next = Vec::with_capacity(chains.len() * readings.len());
            for chain in &chains {
                for reading in &readings {
                    let mut extended = chain.clone();
                    extended.push(KeySegment::new(segment.kind.clone(), reading.clone()));
                    next.push(extended);
                }
            }
            chains = next;
        }

        chains
            .into_iter()
            .map(|segments| {
                Key::from_segments_with_limits(segments, &self.limits).map_err(KeyPathError::from)
            })
            .collect()
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPath::parse(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

fn parse_segment(position: usize, token: &str, limits: &Limits) -> Result<PathSegment, KeyPathError> {
    if token.is_empty() {
        return Err(KeyPathError::EmptySegment { position });
    }
    let (kind, raw) = token
        .split_once(',')
        .ok_or_else(|| KeyPathError::MissingDelimiter {
            position,
            segment: token.to_string(),
        })?;
    if kind.is_empty() {
        return Err(KeyPathError::EmptyKind { position });
    }
    if raw.is_empty() {
        return Err(KeyPathError::EmptyValue { position });
    }
    validate_kind_with_limits(kind, limits)
        .map_err(|source| KeyPathError::InvalidSegment { position, source })?;
    validate_name_with_limits(raw, limits)
        .map_err(|source| KeyPathError::InvalidSegment { position, source })?;
    Ok(PathSegment::new(kind, raw))
}

/// Key path that failed to parse, with the offending input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed key path '{path}': {source}")]
pub struct MalformedKeyPath {
    /// Input text
    pub path: String,
    /// Parse failure
    pub source: KeyPathError,
}

/// Reconstruct the keys to delete for a set of textual paths
///
/// Every path is parsed before any key is produced, so one malformed path
/// rejects the whole set. Candidates are deduplicated across paths and keep
/// first-seen order.
pub fn reconstruct_delete_keys<I, S>(paths: I, limits: &Limits) -> Result<Vec<Key>, MalformedKeyPath>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Vec::new();
    for path in paths {
        let text = path.as_ref();
        let key_path =
            KeyPath::parse_with_limits(text, limits).map_err(|source| MalformedKeyPath {
                path: text.to_string(),
                source,
            })?;
        parsed.push(key_path);
    }

    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for key_path in parsed {
        let candidates = key_path
            .delete_candidates()
            .map_err(|source| MalformedKeyPath {
                path: key_path.to_string(),
                source,
            })?;
        for key in candidates {
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(s: &str) -> KeyPath {
        KeyPath::parse(s).unwrap()
    }

    // === Well-formed paths ===

    #[test]
    fn test_single_numeric_segment() {
        let path = parse("/Player,7");
        assert_eq!(path.len(), 1);
        assert_eq!(path.primary_key(), &Key::id_key("Player", 7, None).unwrap());
    }

    #[test]
    fn test_ancestor_chain_reconstruction() {
        let path = parse("/Player,7/Item,3");
        let key = path.primary_key();
        let player = Key::id_key("Player", 7, None).unwrap();
        assert_eq!(key, &Key::id_key("Item", 3, Some(&player)).unwrap());
        assert_eq!(key.parent(), Some(player));
    }

    #[test]
    fn test_named_segment_has_single_candidate() {
        let path = parse("/Player,alice");
        assert_eq!(path.ambiguous_segments(), 0);
        let candidates = path.delete_candidates().unwrap();
        assert_eq!(
            candidates,
            vec![Key::name_key("Player", "alice", None).unwrap()]
        );
    }

    #[test]
    fn test_numeric_segment_yields_both_candidates() {
        let candidates = parse("/Player,7").delete_candidates().unwrap();
        assert_eq!(
            candidates,
            vec![
                Key::id_key("Player", 7, None).unwrap(),
                Key::name_key("Player", "7", None).unwrap(),
            ]
        );
    }

    #[test]
    fn test_zero_is_a_name() {
        let path = parse("/Player,0");
        assert_eq!(path.primary_key().name(), Some("0"));
        assert_eq!(path.delete_candidates().unwrap().len(), 1);
    }

    #[test]
    fn test_negative_is_a_name() {
        let path = parse("/Player,-3");
        assert_eq!(path.primary_key().name(), Some("-3"));
        assert_eq!(path.ambiguous_segments(), 0);
    }

    #[test]
    fn test_overflowing_number_is_a_name() {
        let path = parse("/Player,9223372036854775808");
        assert_eq!(path.primary_key().name(), Some("9223372036854775808"));
        assert_eq!(path.ambiguous_segments(), 0);
    }

    #[test]
    fn test_non_canonical_number_primary_is_name() {
        let path = parse("/Player,007");
        assert_eq!(path.primary_key().name(), Some("007"));
        let candidates = path.delete_candidates().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1], Key::id_key("Player", 7, None).unwrap());
    }

    #[test]
    fn test_name_may_contain_comma() {
        let path = parse("/Tag,a,b");
        assert_eq!(path.primary_key().name(), Some("a,b"));
        assert_eq!(path.to_string(), "/Tag,a,b");
    }

    #[test]
    fn test_candidates_cover_every_combination() {
        let candidates = parse("/Player,7/Item,3").delete_candidates().unwrap();
        let rendered: Vec<String> = candidates.iter().map(|k| format!("{:?}", k.segments())).collect();
        assert_eq!(candidates.len(), 4);
        assert_eq!(&candidates[0], parse("/Player,7/Item,3").primary_key());
        // All distinct
        let unique: HashSet<_> = rendered.iter().collect();
        assert_eq!(unique.len(), 4);
        // Every candidate's parent is itself a fully reconstructed key.
        for key in &candidates {
            assert_eq!(key.parent().unwrap().kind(), "Player");
        }
    }

    #[test]
    fn test_from_str() {
        let path: KeyPath = "/A,1/B,x".parse().unwrap();
        assert_eq!(path.segments()[1].kind(), "B");
        assert_eq!(path.segments()[1].raw(), "x");
    }

    // === Malformed paths ===

    #[test]
    fn test_empty_path() {
        assert_eq!(KeyPath::parse(""), Err(KeyPathError::Empty));
    }

    #[test]
    fn test_missing_leading_slash() {
        assert_eq!(
            KeyPath::parse("Player,7"),
            Err(KeyPathError::MissingLeadingSlash)
        );
    }

    #[test]
    fn test_missing_delimiter() {
        assert_eq!(
            KeyPath::parse("/Player,7/Item"),
            Err(KeyPathError::MissingDelimiter {
                position: 1,
                segment: "Item".into()
            })
        );
    }

    #[test]
    fn test_empty_kind() {
        assert_eq!(
            KeyPath::parse("/,7"),
            Err(KeyPathError::EmptyKind { position: 0 })
        );
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(
            KeyPath::parse("/Player,"),
            Err(KeyPathError::EmptyValue { position: 0 })
        );
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(
            KeyPath::parse("/"),
            Err(KeyPathError::EmptySegment { position: 0 })
        );
        assert_eq!(
            KeyPath::parse("/A,1//B,2"),
            Err(KeyPathError::EmptySegment { position: 1 })
        );
        assert_eq!(
            KeyPath::parse("/A,1/"),
            Err(KeyPathError::EmptySegment { position: 1 })
        );
    }

    #[test]
    fn test_reserved_kind_rejected() {
        let err = KeyPath::parse("/__kind__,Player").unwrap_err();
        assert_eq!(err.reason_code(), "reserved_kind");
    }

    #[test]
    fn test_too_deep() {
        let limits = Limits::with_small_limits();
        assert_eq!(
            KeyPath::parse_with_limits("/A,a/B,b/C,c/D,d/E,e", &limits),
            Err(KeyPathError::TooDeep { actual: 5, max: 4 })
        );
    }

    #[test]
    fn test_too_ambiguous() {
        let limits = Limits::with_small_limits();
        assert!(KeyPath::parse_with_limits("/A,1/B,2", &limits).is_ok());
        assert_eq!(
            KeyPath::parse_with_limits("/A,1/B,2/C,3", &limits),
            Err(KeyPathError::TooAmbiguous { actual: 3, max: 2 })
        );
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(KeyPathError::Empty.reason_code(), "empty_path");
        assert_eq!(
            KeyPathError::EmptyKind { position: 0 }.reason_code(),
            "empty_kind"
        );
        assert_eq!(
            KeyPathError::MissingDelimiter {
                position: 0,
                segment: "x".into()
            }
            .reason_code(),
            "missing_delimiter"
        );
    }

    // === Reconstructing delete sets ===

    #[test]
    fn test_reconstruct_delete_keys_flattens_and_dedups() {
        let keys = reconstruct_delete_keys(
            ["/Player,alice", "/Player,7", "/Player,alice"],
            &Limits::default(),
        )
        .unwrap();
        assert_eq!(
            keys,
            vec![
                Key::name_key("Player", "alice", None).unwrap(),
                Key::id_key("Player", 7, None).unwrap(),
                Key::name_key("Player", "7", None).unwrap(),
            ]
        );
    }

    #[test]
    fn test_reconstruct_delete_keys_rejects_whole_set() {
        let err = reconstruct_delete_keys(["/Player,7", "/Player"], &Limits::default())
            .unwrap_err();
        assert_eq!(err.path, "/Player");
        assert!(matches!(err.source, KeyPathError::MissingDelimiter { .. }));
        assert!(err.to_string().contains("malformed key path '/Player'"));
    }

    #[test]
    fn test_reconstruct_empty_set() {
        let keys = reconstruct_delete_keys(Vec::<String>::new(), &Limits::default()).unwrap();
        assert!(keys.is_empty());
    }

    // === Round trips ===

    fn segment_strategy() -> impl Strategy<Value = (String, String)> {
        let kind = "[A-Z][A-Za-z0-9_]{0,8}";
        let value = prop_oneof![
            (1i64..=i64::MAX).prop_map(|id| id.to_string()),
            "[a-zA-Z0-9_.+-]{1,10}",
        ];
        (kind, value)
    }

    proptest! {
        #[test]
        fn prop_primary_key_round_trips(segments in prop::collection::vec(segment_strategy(), 1..6)) {
            let text: String = segments
                .iter()
                .map(|(kind, value)| format!("/{},{}", kind, value))
                .collect();
            let path = KeyPath::parse(&text).unwrap();
            prop_assert_eq!(path.primary_key().to_string(), text.clone());
            prop_assert_eq!(path.to_string(), text);
        }

        #[test]
        fn prop_rendered_keys_parse_back(ids in prop::collection::vec(1i64..1_000_000, 1..6)) {
            let segments: Vec<KeySegment> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| KeySegment::new(format!("K{}", i), *id))
                .collect();
            let key = Key::from_segments(segments).unwrap();
            let path = KeyPath::parse(&key.to_string()).unwrap();
            prop_assert_eq!(path.primary_key(), &key);
        }

        #[test]
        fn prop_candidates_start_with_primary(segments in prop::collection::vec(segment_strategy(), 1..5)) {
            let text: String = segments
                .iter()
                .map(|(kind, value)| format!("/{},{}", kind, value))
                .collect();
            let path = KeyPath::parse(&text).unwrap();
            let candidates = path.delete_candidates().unwrap();
            prop_assert_eq!(candidates.len(), 1usize << path.ambiguous_segments());
            prop_assert_eq!(&candidates[0], path.primary_key());
        }
    }
}
