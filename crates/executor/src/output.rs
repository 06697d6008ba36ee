//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. [`Output::to_json`]
//! renders the response body the presentation layer expects.

use dsview_core::Batch;
use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// use dsview_executor::{Command, Output, Executor};
///
/// let result = executor.execute(Command::ListNamespaces)?;
///
/// match result {
///     Output::Namespaces(names) => println!("{:?}", names),
///     _ => unreachable!("ListNamespaces always returns Namespaces"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Output {
    // ==================== Metadata ====================
    /// Namespace names in display form
    Namespaces(Vec<String>),

    /// Kind names
    Kinds(Vec<String>),

    // ==================== Entities ====================
    /// Decoded entities, unique by identity, in key order
    Entities(Batch),

    /// Property names, identity label first
    Properties(Vec<String>),

    /// Delete request accepted by the store
    Deleted {
        /// Key paths in the request.
        requested: usize,
        /// Candidate keys submitted to the store.
        submitted: usize,
    },
}

/// Response body: a single-field object named after the variant.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Body<'a> {
    Namespaces(&'a [String]),
    Kinds(&'a [String]),
    Entities(&'a Batch),
    Properties(&'a [String]),
    Deleted(usize),
}

impl Output {
    fn body(&self) -> Body<'_> {
        match self {
            Output::Namespaces(names) => Body::Namespaces(names),
            Output::Kinds(kinds) => Body::Kinds(kinds),
            Output::Entities(batch) => Body::Entities(batch),
            Output::Properties(names) => Body::Properties(names),
            Output::Deleted { requested, .. } => Body::Deleted(*requested),
        }
    }

    /// Render the response body as a JSON value.
    ///
    /// | Variant | Body |
    /// |---------|------|
    /// | `Namespaces` | `{"namespaces": [...]}` |
    /// | `Kinds` | `{"kinds": [...]}` |
    /// | `Entities` | `{"entities": [...]}` |
    /// | `Properties` | `{"properties": [...]}` |
    /// | `Deleted` | `{"deleted": N}` |
    ///
    /// `serde_json::Value` objects do not keep field order; use
    /// [`Output::to_json_string`] for the wire form, where every entity
    /// starts with its identity field.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.body())?)
    }

    /// Render the response body as a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.body())?)
    }
}
