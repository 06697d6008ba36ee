//! Request bodies accepted by the transport layer.

use serde::{Deserialize, Serialize};

use crate::{Command, Error, Result};

/// Body of a delete request: `{"keys": ["/Kind,value/Kind,value", ...]}`.
///
/// A missing `keys` field is an empty request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Textual key paths, one per entity.
    #[serde(default)]
    pub keys: Vec<String>,
}

impl DeleteRequest {
    /// Parse a request body.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the body is not the expected JSON.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| Error::InvalidInput {
            reason: format!("invalid delete request body: {}", e),
        })
    }

    /// Turn the request into a command for the given namespace and kind.
    pub fn into_command(self, namespace: impl Into<String>, kind: impl Into<String>) -> Command {
        Command::DeleteEntities {
            namespace: namespace.into(),
            kind: kind.into(),
            keys: self.keys,
        }
    }
}
