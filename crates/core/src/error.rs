//! Error types for dsview-core
//!
//! Each component has its own error enum; [`Error`] unifies them for callers
//! that drive several components at once. We use `thiserror` for automatic
//! `Display` and `Error` trait implementations.

use crate::codec::CodecError;
use crate::key::KeyError;
use crate::key_path::MalformedKeyPath;
use thiserror::Error;

/// Result type alias for dsview-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the data-access core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Key violates validation rules
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Textual key path could not be parsed
    #[error(transparent)]
    MalformedKeyPath(#[from] MalformedKeyPath),

    /// Record could not be decoded
    #[error("decode error: {0}")]
    Codec(#[from] CodecError),
}

impl Error {
    /// Check if the error was caused by client input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidKey(_) | Error::MalformedKeyPath(_))
    }
}
