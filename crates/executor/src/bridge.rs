//! Bridge module: what handlers need from the store side.
//!
//! - [`Backend`]: the store client plus the settings that shape every request
//! - [`to_namespace`]: converts a display-form namespace to a core `Namespace`
//! - [`validate_kind`]: rejects kind parameters the store would refuse

use std::sync::Arc;

use dsview_core::key::validate_kind_with_limits;
use dsview_core::{Limits, Namespace};
use dsview_engine::{Datastore, StoreMode};

use crate::{Error, Result};

// =============================================================================
// Backend
// =============================================================================

/// Store client and request settings shared by all handlers.
#[derive(Clone)]
pub struct Backend {
    /// External store
    pub store: Arc<dyn Datastore>,
    /// Whether metadata queries are available
    pub mode: StoreMode,
    /// Entities sampled per kind when metadata is unavailable
    pub sample_size: usize,
    /// Validation limits
    pub limits: Limits,
}

// =============================================================================
// Conversion and Validation
// =============================================================================

/// Convert a display-form namespace (`"default"` = empty) to a core namespace.
pub fn to_namespace(label: &str) -> Namespace {
    Namespace::from_display(label)
}

/// Validate a kind parameter.
pub fn validate_kind(kind: &str, limits: &Limits) -> Result<()> {
    validate_kind_with_limits(kind, limits)
        .map_err(|e| Error::invalid_input(format!("kind '{}': {}", kind, e)))
}
