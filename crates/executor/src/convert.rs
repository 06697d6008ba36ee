//! Error conversion from internal error types.
//!
//! This module provides conversions from core and engine errors to the
//! executor's [`Error`] type.

use crate::Error;
use dsview_core::{CodecError, KeyError, MalformedKeyPath};
use dsview_engine::StoreError;

/// Every store failure is an upstream failure; nothing is retried here.
impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Upstream {
            reason: err.to_string(),
        }
    }
}

impl From<MalformedKeyPath> for Error {
    fn from(err: MalformedKeyPath) -> Self {
        Error::MalformedKeyPath {
            code: err.source.reason_code().to_string(),
            reason: err.source.to_string(),
            path: err.path,
        }
    }
}

impl From<KeyError> for Error {
    fn from(err: KeyError) -> Self {
        Error::InvalidInput {
            reason: err.to_string(),
        }
    }
}

/// Records the store hands back that cannot be decoded.
impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        Error::Internal {
            reason: err.to_string(),
        }
    }
}

impl From<dsview_core::Error> for Error {
    fn from(err: dsview_core::Error) -> Self {
        match err {
            dsview_core::Error::InvalidKey(e) => e.into(),
            dsview_core::Error::MalformedKeyPath(e) => e.into(),
            dsview_core::Error::Codec(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization {
            reason: err.to_string(),
        }
    }
}
