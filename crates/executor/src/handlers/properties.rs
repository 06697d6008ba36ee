//! Property list derivation.
//!
//! With metadata queries the list comes from the store's property metadata;
//! otherwise it is inferred from a sample of the kind's entities.

use dsview_core::{merge_entity_properties, merge_metadata_properties};
use dsview_engine::Query;

use crate::bridge::{to_namespace, validate_kind, Backend};
use crate::handlers::entities::collect_batch;
use crate::{Output, Result};

/// Handle GetProperties command.
pub fn get_properties(b: &Backend, namespace: String, kind: String) -> Result<Output> {
    validate_kind(&kind, &b.limits)?;
    let namespace = to_namespace(&namespace);

    let names = if b.mode.has_metadata() {
        let rows = b.store.property_metadata(&namespace)?;
        merge_metadata_properties(&kind, &rows)
    } else {
        let query = Query::kind(namespace, kind).limit(b.sample_size);
        let sample = collect_batch(b, &query)?;
        merge_entity_properties(&sample)
    };
    Ok(Output::Properties(names))
}
