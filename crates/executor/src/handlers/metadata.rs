//! Namespace and kind listing.
//!
//! Without metadata queries the browser has one namespace (`default`) and
//! the configured kinds.

use dsview_core::key::RESERVED_KIND_PREFIX;
use dsview_core::DEFAULT_NAMESPACE_LABEL;
use dsview_engine::StoreMode;

use crate::bridge::{to_namespace, Backend};
use crate::{Output, Result};

/// Handle ListNamespaces command.
pub fn list_namespaces(b: &Backend) -> Result<Output> {
    if !b.mode.has_metadata() {
        return Ok(Output::Namespaces(vec![DEFAULT_NAMESPACE_LABEL.to_string()]));
    }
    let namespaces = b.store.namespaces()?;
    Ok(Output::Namespaces(
        namespaces
            .iter()
            .map(|ns| ns.display_name().to_string())
            .collect(),
    ))
}

/// Handle ListKinds command.
///
/// Store-internal kinds (`__` prefix) are not listed.
pub fn list_kinds(b: &Backend, namespace: String) -> Result<Output> {
    if let StoreMode::Firestore { kinds } = &b.mode {
        return Ok(Output::Kinds(kinds.clone()));
    }
    let kinds = b.store.kinds(&to_namespace(&namespace))?;
    Ok(Output::Kinds(
        kinds
            .into_iter()
            .filter(|k| !k.starts_with(RESERVED_KIND_PREFIX))
            .collect(),
    ))
}
