//! Browser Workflow Tests
//!
//! Drives the public `dsview` API the way the HTTP layer does:
//! - configuration loaded from `dsview.toml`
//! - listing namespaces, kinds, entities and properties
//! - deleting entities from a request body

mod common;

mod config;
mod workflow;
