//! Store seam
//!
//! The data-access core never talks to a store directly. Query execution,
//! deletion and metadata enumeration are provided by an implementation of
//! [`Datastore`]; the core only transforms what it is handed.
//!
//! Implementations must treat deleting an absent key as a no-op. Retries, if
//! any, are the implementation's business; failures are reported as
//! [`StoreError`] and propagated to the caller unchanged.

use dsview_core::{Key, Namespace, Property, PropertyMetadata};
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure of an external store operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store could not be reached
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Failure detail
        reason: String,
    },

    /// Entity query failed
    #[error("query failed: {reason}")]
    Query {
        /// Failure detail
        reason: String,
    },

    /// Delete failed
    #[error("delete failed: {reason}")]
    Delete {
        /// Failure detail
        reason: String,
    },

    /// Metadata query failed
    #[error("metadata query failed: {reason}")]
    Metadata {
        /// Failure detail
        reason: String,
    },

    /// Store does not implement this operation
    #[error("operation not supported by this store: {operation}")]
    Unsupported {
        /// Operation name
        operation: String,
    },
}

impl StoreError {
    /// Create a query error
    pub fn query(reason: impl Into<String>) -> Self {
        StoreError::Query {
            reason: reason.into(),
        }
    }

    /// Create a delete error
    pub fn delete(reason: impl Into<String>) -> Self {
        StoreError::Delete {
            reason: reason.into(),
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        StoreError::Unsupported {
            operation: operation.into(),
        }
    }
}

/// How kinds, namespaces and property lists are discovered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreMode {
    /// Metadata queries are available
    #[default]
    Datastore,
    /// No metadata queries; kinds are configured and properties are sampled
    Firestore {
        /// Configured kind names
        kinds: Vec<String>,
    },
}

impl StoreMode {
    /// Check if metadata queries may be used
    pub fn has_metadata(&self) -> bool {
        matches!(self, StoreMode::Datastore)
    }
}

/// Entity query for one kind in one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    namespace: Namespace,
    kind: String,
    order_by_key: bool,
    limit: Option<usize>,
}

impl Query {
    /// Query every entity of `kind` in `namespace`
    pub fn kind(namespace: Namespace, kind: impl Into<String>) -> Self {
        Query {
            namespace,
            kind: kind.into(),
            order_by_key: false,
            limit: None,
        }
    }

    /// Return results in key order
    pub fn order_by_key(mut self) -> Self {
        self.order_by_key = true;
        self
    }

    /// Return at most `limit` results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Namespace queried
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Kind queried
    pub fn kind_name(&self) -> &str {
        &self.kind
    }

    /// Check if results are key-ordered
    pub fn is_ordered_by_key(&self) -> bool {
        self.order_by_key
    }

    /// Result limit, if any
    pub fn result_limit(&self) -> Option<usize> {
        self.limit
    }
}

/// One record returned by a query
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Record key
    pub key: Key,
    /// Raw property list
    pub properties: Vec<Property>,
}

impl RawRecord {
    /// Create a record
    pub fn new(key: Key, properties: Vec<Property>) -> Self {
        RawRecord { key, properties }
    }
}

/// Stream of query results
pub type RecordStream<'a> = Box<dyn Iterator<Item = StoreResult<RawRecord>> + 'a>;

/// External store client
///
/// Implementations are shared across concurrent requests and must be
/// `Send + Sync`.
pub trait Datastore: Send + Sync {
    /// Run an entity query
    fn run_query(&self, query: &Query) -> StoreResult<RecordStream<'_>>;

    /// Delete keys; absent keys are ignored
    fn delete(&self, namespace: &Namespace, keys: &[Key]) -> StoreResult<()>;

    /// List namespaces (the default namespace is the empty one)
    fn namespaces(&self) -> StoreResult<Vec<Namespace>>;

    /// List kinds in a namespace
    fn kinds(&self, namespace: &Namespace) -> StoreResult<Vec<String>>;

    /// List property metadata rows in a namespace, ordered by kind then name
    fn property_metadata(&self, namespace: &Namespace) -> StoreResult<Vec<PropertyMetadata>>;
}
