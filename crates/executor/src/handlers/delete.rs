//! Entity deletion by textual key path.

use dsview_core::{reconstruct_delete_keys, render_key};
use tracing::info;

use crate::bridge::{to_namespace, Backend};
use crate::{Output, Result};

/// Handle DeleteEntities command.
///
/// Every path is parsed before anything is deleted; one malformed path fails
/// the whole request. All candidate keys go to the store in a single call.
pub fn delete_entities(
    b: &Backend,
    namespace: String,
    kind: String,
    keys: Vec<String>,
) -> Result<Output> {
    let namespace = to_namespace(&namespace);
    let candidates = reconstruct_delete_keys(&keys, &b.limits)?;

    if !candidates.is_empty() {
        b.store.delete(&namespace, &candidates)?;
    }

    let rendered: Vec<String> = candidates.iter().map(render_key).collect();
    info!(
        target: "dsview::executor",
        namespace = %namespace,
        kind = %kind,
        requested = keys.len(),
        submitted = candidates.len(),
        keys = ?rendered,
        "Deleted entities"
    );
    Ok(Output::Deleted {
        requested: keys.len(),
        submitted: candidates.len(),
    })
}
