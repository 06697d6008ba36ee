//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Classified**: [`Error::status_code`] tells the transport layer whether
//!   the caller or the store is at fault

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Status |
/// |----------|----------|--------|
/// | Client | `MalformedKeyPath`, `InvalidInput` | 400 |
/// | Upstream | `Upstream` | 502 |
/// | System | `Serialization`, `Internal` | 500 |
///
/// # Example
///
/// ```ignore
/// use dsview_executor::{Command, Error, Executor};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::MalformedKeyPath { path, .. }) => {
///         println!("bad key path '{}'", path);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Client Errors ====================
    /// Delete request path could not be parsed
    #[error("malformed key path '{path}': {reason}")]
    MalformedKeyPath {
        /// Path as received
        path: String,
        /// Parse failure detail
        reason: String,
        /// Machine-readable failure code
        code: String,
    },

    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    // ==================== Upstream Errors ====================
    /// Store query, delete or metadata call failed
    #[error("upstream failure: {reason}")]
    Upstream {
        /// Store failure detail
        reason: String,
    },

    // ==================== System Errors ====================
    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization {
        /// Encoder failure detail
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Failure detail
        reason: String,
    },
}

impl Error {
    /// HTTP status code the transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::MalformedKeyPath { .. } | Error::InvalidInput { .. } => 400,
            Error::Upstream { .. } => 502,
            Error::Serialization { .. } | Error::Internal { .. } => 500,
        }
    }

    /// Check if the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        self.status_code() == 400
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }
}
