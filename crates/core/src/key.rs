//! Key validation for dsview
//!
//! This module defines the rules every [`Key`](crate::Key) segment must obey.
//! Keys are built either from store results or from textual key paths in
//! delete requests; both go through the same checks.
//!
//! ## Rules
//!
//! - Kinds must not be empty
//! - Kinds must not start with the reserved metadata prefix `__`
//! - Kinds and names must not exceed their byte limits (default: 1500)
//! - Names must not be empty
//! - Numeric ids must be strictly positive
//! - Ancestor chains must not exceed `max_path_depth` segments (default: 100)

use crate::limits::Limits;
use thiserror::Error;

/// Reserved prefix for the store's metadata kinds (`__kind__`, `__property__`, ...)
pub const RESERVED_KIND_PREFIX: &str = "__";

/// Validate a kind using default limits
///
/// # Examples
///
/// ```
/// use dsview_core::key::validate_kind;
///
/// assert!(validate_kind("Player").is_ok());
/// assert!(validate_kind("").is_err());
/// assert!(validate_kind("__kind__").is_err());
/// ```
pub fn validate_kind(kind: &str) -> Result<(), KeyError> {
    validate_kind_with_limits(kind, &Limits::default())
}

/// Validate a kind with custom limits
pub fn validate_kind_with_limits(kind: &str, limits: &Limits) -> Result<(), KeyError> {
    if kind.is_empty() {
        return Err(KeyError::EmptyKind);
    }

    if kind.starts_with(RESERVED_KIND_PREFIX) {
        return Err(KeyError::ReservedKind(kind.to_string()));
    }

    let len = kind.len();
    if len > limits.max_kind_bytes {
        return Err(KeyError::KindTooLong {
            actual: len,
            max: limits.max_kind_bytes,
        });
    }

    Ok(())
}

/// Validate a key name with custom limits
pub fn validate_name_with_limits(name: &str, limits: &Limits) -> Result<(), KeyError> {
    if name.is_empty() {
        return Err(KeyError::EmptyName);
    }

    let len = name.len();
    if len > limits.max_name_bytes {
        return Err(KeyError::NameTooLong {
            actual: len,
            max: limits.max_name_bytes,
        });
    }

    Ok(())
}

/// Validate a numeric id
pub fn validate_id(id: i64) -> Result<(), KeyError> {
    if id <= 0 {
        return Err(KeyError::NonPositiveId(id));
    }
    Ok(())
}

/// Validate the number of segments in an ancestor chain
pub fn validate_depth_with_limits(depth: usize, limits: &Limits) -> Result<(), KeyError> {
    if depth == 0 {
        return Err(KeyError::NoSegments);
    }
    if depth > limits.max_path_depth {
        return Err(KeyError::TooDeep {
            actual: depth,
            max: limits.max_path_depth,
        });
    }
    Ok(())
}

/// Key validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Kind is empty
    #[error("kind cannot be empty")]
    EmptyKind,

    /// Kind uses the reserved metadata prefix
    #[error("kind '{0}' uses reserved prefix '{}'", RESERVED_KIND_PREFIX)]
    ReservedKind(String),

    /// Kind exceeds maximum length
    #[error("kind too long: {actual} bytes exceeds maximum {max}")]
    KindTooLong {
        /// Actual kind length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Name is empty
    #[error("key name cannot be empty")]
    EmptyName,

    /// Name exceeds maximum length
    #[error("key name too long: {actual} bytes exceeds maximum {max}")]
    NameTooLong {
        /// Actual name length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Numeric id is zero or negative
    #[error("key id must be positive, got {0}")]
    NonPositiveId(i64),

    /// Key has no segments
    #[error("key must have at least one segment")]
    NoSegments,

    /// Ancestor chain is too deep
    #[error("key path too deep: {actual} segments exceeds maximum {max}")]
    TooDeep {
        /// Actual number of segments
        actual: usize,
        /// Maximum allowed segments
        max: usize,
    },
}

impl KeyError {
    /// Get the reason code reported to clients
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::EmptyKind => "empty_kind",
            KeyError::ReservedKind(_) => "reserved_kind",
            KeyError::KindTooLong { .. } => "kind_too_long",
            KeyError::EmptyName => "empty_name",
            KeyError::NameTooLong { .. } => "name_too_long",
            KeyError::NonPositiveId(_) => "non_positive_id",
            KeyError::NoSegments => "no_segments",
            KeyError::TooDeep { .. } => "key_too_deep",
        }
    }
}
