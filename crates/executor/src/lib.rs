//! # dsview Executor
//!
//! Request operations of the dsview datastore browser.
//!
//! This crate turns transport-level requests into calls on the data-access
//! core. It provides:
//! - [`Executor`] - dispatches commands against a [`Datastore`]
//! - [`Command`]/[`Output`] - the request and response vocabulary
//! - [`DeleteRequest`] - the delete request body
//!
//! ## Quick Start
//!
//! ```text
//! use dsview_executor::{Command, DsviewConfig, Executor};
//!
//! let config = DsviewConfig::from_file("dsview.toml".as_ref())?;
//! let executor = Executor::with_config(store, &config);
//!
//! let body = executor
//!     .execute(Command::ListKinds { namespace: "default".into() })?
//!     .to_json_string()?;
//! ```
//!
//! ## Operations
//!
//! | Command | Response body |
//! |---------|---------------|
//! | **ListNamespaces** | `{"namespaces": [...]}` |
//! | **ListKinds** | `{"kinds": [...]}` |
//! | **GetEntities** | `{"entities": [...]}` |
//! | **GetProperties** | `{"properties": [...]}` |
//! | **DeleteEntities** | `{"deleted": N}` |

#![warn(missing_docs)]

pub(crate) mod bridge;
mod command;
mod convert;
mod error;
mod executor;
mod output;
mod request;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use request::DeleteRequest;

// Re-export store and configuration types so users don't need dsview-engine directly
pub use dsview_engine::{
    ConfigError, Datastore, DsviewConfig, MemoryDatastore, StoreError, StoreMode,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
