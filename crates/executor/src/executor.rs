//! The Executor - single entry point to the data-access core.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate handlers and converts results to outputs.

use std::sync::Arc;

use dsview_core::Limits;
use dsview_engine::{Datastore, DsviewConfig, StoreMode};
use tracing::{debug, info, warn};

use crate::bridge::Backend;
use crate::handlers;
use crate::{Command, Output, Result};

/// The command executor - single entry point to the data-access core.
///
/// The Executor is **stateless**: it holds the store client and request
/// settings but keeps nothing between commands. Every command builds its own
/// accumulator, so concurrent commands never share a batch.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use dsview_core::{Key, Namespace, Property};
/// use dsview_engine::{MemoryDatastore, StoreMode};
/// use dsview_executor::{Command, Executor, Output};
///
/// let store = MemoryDatastore::new();
/// store.put(
///     &Namespace::default(),
///     Key::id_key("Player", 7, None).unwrap(),
///     vec![Property::new("Score", 42i64)],
/// );
/// let executor = Executor::new(Arc::new(store), StoreMode::Datastore);
///
/// let output = executor
///     .execute(Command::GetEntities {
///         namespace: "default".into(),
///         kind: "Player".into(),
///     })
///     .unwrap();
/// assert_eq!(
///     output.to_json_string().unwrap(),
///     r#"{"entities":[{"ID/Name":"/Player,7","Score":42}]}"#
/// );
/// ```
pub struct Executor {
    backend: Backend,
}

impl Executor {
    /// Create a new executor over a store.
    ///
    /// Samples one entity per kind when inferring properties.
    pub fn new(store: Arc<dyn Datastore>, mode: StoreMode) -> Self {
        Self {
            backend: Backend {
                store,
                mode,
                sample_size: 1,
                limits: Limits::default(),
            },
        }
    }

    /// Create an executor configured from `dsview.toml` settings.
    pub fn with_config(store: Arc<dyn Datastore>, config: &DsviewConfig) -> Self {
        let mode = config.store_mode();
        info!(
            target: "dsview::executor",
            metadata = mode.has_metadata(),
            sample_size = config.property_sample_size,
            "Executor configured"
        );
        let mut executor = Self::new(store, mode);
        executor.backend.sample_size = config.property_sample_size.max(1);
        executor
    }

    /// Replace the validation limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.backend.limits = limits;
        self
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        debug!(target: "dsview::executor", command = name, "Executing command");

        let result = match cmd {
            Command::ListNamespaces => handlers::metadata::list_namespaces(&self.backend),
            Command::ListKinds { namespace } => {
                handlers::metadata::list_kinds(&self.backend, namespace)
            }
            Command::GetEntities { namespace, kind } => {
                handlers::entities::get_entities(&self.backend, namespace, kind)
            }
            Command::GetProperties { namespace, kind } => {
                handlers::properties::get_properties(&self.backend, namespace, kind)
            }
            Command::DeleteEntities {
                namespace,
                kind,
                keys,
            } => handlers::delete::delete_entities(&self.backend, namespace, kind, keys),
        };

        if let Err(e) = &result {
            warn!(
                target: "dsview::executor",
                command = name,
                status = e.status_code(),
                error = %e,
                "Command failed"
            );
        }
        result
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns all results in the same order as the input commands.
    /// Execution continues even if some commands fail.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Discovery mode in effect.
    pub fn mode(&self) -> &StoreMode {
        &self.backend.mode
    }

    /// Entities sampled per kind when inferring properties.
    pub fn sample_size(&self) -> usize {
        self.backend.sample_size
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &Arc<dyn Datastore> {
        &self.backend.store
    }
}
