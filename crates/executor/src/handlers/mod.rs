//! Command handlers organized by concern.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `metadata` | ListNamespaces, ListKinds |
//! | `entities` | GetEntities |
//! | `properties` | GetProperties |
//! | `delete` | DeleteEntities |

pub mod delete;
pub mod entities;
pub mod metadata;
pub mod properties;
