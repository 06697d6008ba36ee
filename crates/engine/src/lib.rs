//! Store plumbing for dsview
//!
//! This crate sits between the data-access core and a concrete store:
//! - Store seam: the `Datastore` trait, queries and raw records
//! - In-memory store used by tests and local development
//! - Configuration loaded from `dsview.toml`
//!
//! The engine is the only component that knows about:
//! - Whether metadata queries are available (store mode)
//! - How store failures are classified

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod memory;
pub mod store;

pub use config::{ConfigError, DsviewConfig, CONFIG_FILE_NAME};
pub use memory::MemoryDatastore;
pub use store::{Datastore, Query, RawRecord, RecordStream, StoreError, StoreMode, StoreResult};
