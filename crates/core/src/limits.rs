//! Size limits for keys, key paths and decoded entities
//!
//! This module defines the limits enforced by key validation, the key-path
//! parser and the property codec. The defaults follow the store's own
//! documented bounds; tests can shrink them with [`Limits::with_small_limits`].

/// Limits applied while building keys and decoding records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum kind length in bytes (default: 1500)
    pub max_kind_bytes: usize,

    /// Maximum key name length in bytes (default: 1500)
    pub max_name_bytes: usize,

    /// Maximum number of segments in an ancestor chain (default: 100)
    pub max_path_depth: usize,

    /// Maximum number of id-or-name segments expanded for one delete path (default: 8)
    pub max_ambiguous_segments: usize,

    /// Maximum nested-entity depth decoded from one record (default: 100)
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_kind_bytes: 1500,
            max_name_bytes: 1500,
            max_path_depth: 100,
            max_ambiguous_segments: 8,
            max_nesting_depth: 100,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_kind_bytes: 16,
            max_name_bytes: 16,
            max_path_depth: 4,
            max_ambiguous_segments: 2,
            max_nesting_depth: 3,
        }
    }

    /// Upper bound on the number of delete candidates one path can expand to
    pub fn max_delete_candidates(&self) -> usize {
        1usize << self.max_ambiguous_segments.min(usize::BITS as usize - 1)
    }
}
