//! Entity listing.

use dsview_core::{Batch, EntityAccumulator};
use dsview_engine::Query;
use tracing::debug;

use crate::bridge::{to_namespace, validate_kind, Backend};
use crate::{Output, Result};

/// Handle GetEntities command.
pub fn get_entities(b: &Backend, namespace: String, kind: String) -> Result<Output> {
    validate_kind(&kind, &b.limits)?;
    let query = Query::kind(to_namespace(&namespace), kind).order_by_key();
    Ok(Output::Entities(collect_batch(b, &query)?))
}

/// Run a query and decode its records into a request-local batch.
///
/// Stops at the first store or decode error.
pub(crate) fn collect_batch(b: &Backend, query: &Query) -> Result<Batch> {
    let mut acc = EntityAccumulator::with_limits(b.limits.clone());
    for record in b.store.run_query(query)? {
        let record = record?;
        acc.load(&record.key, record.properties)?;
    }
    if acc.duplicates() > 0 {
        debug!(
            target: "dsview::executor",
            kind = query.kind_name(),
            duplicates = acc.duplicates(),
            "Discarded duplicate records"
        );
    }
    Ok(acc.finish())
}
