//! Command enum defining all dsview operations.
//!
//! Commands are the "instruction set" of the browser. Every request the
//! transport layer accepts maps to one variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

/// A command is a self-contained, serializable operation.
///
/// # Namespace field
///
/// Namespaces are given in display form: `"default"` addresses the empty
/// (default) namespace, any other string is used as-is.
///
/// # Example
///
/// ```
/// use dsview_executor::Command;
///
/// let cmd = Command::DeleteEntities {
///     namespace: "default".into(),
///     kind: "Item".into(),
///     keys: vec!["/Player,7/Item,3".into()],
/// };
/// assert_eq!(cmd.name(), "DeleteEntities");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Metadata ====================
    /// List namespaces.
    /// Returns: `Output::Namespaces`
    ListNamespaces,

    /// List kinds in a namespace.
    /// Returns: `Output::Kinds`
    ListKinds {
        /// Namespace in display form
        namespace: String,
    },

    // ==================== Entities ====================
    /// Fetch every entity of a kind, in key order.
    /// Returns: `Output::Entities`
    GetEntities {
        /// Namespace in display form
        namespace: String,
        /// Kind to list
        kind: String,
    },

    /// Derive the property list of a kind.
    /// Returns: `Output::Properties`
    GetProperties {
        /// Namespace in display form
        namespace: String,
        /// Kind to describe
        kind: String,
    },

    /// Delete entities by textual key path.
    /// Returns: `Output::Deleted`
    DeleteEntities {
        /// Namespace in display form
        namespace: String,
        /// Kind shown by the caller; the paths decide what is deleted
        kind: String,
        /// Textual key paths
        keys: Vec<String>,
    },
}

impl Command {
    /// Variant name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListNamespaces => "ListNamespaces",
            Command::ListKinds { .. } => "ListKinds",
            Command::GetEntities { .. } => "GetEntities",
            Command::GetProperties { .. } => "GetProperties",
            Command::DeleteEntities { .. } => "DeleteEntities",
        }
    }

    /// Check if the command writes to the store.
    pub fn is_write(&self) -> bool {
        matches!(self, Command::DeleteEntities { .. })
    }
}
