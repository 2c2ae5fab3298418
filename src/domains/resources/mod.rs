//! Resources domain module.
//!
//! Implements the generic resource endpoint contract shared by State, City,
//! Amenity, User, Place and Review.
//!
//! ## Architecture
//!
//! - `definitions/` - Per-kind constants (one file per kind)
//! - `registry.rs` - Central registration, turns definitions into specs
//! - `models.rs` - `ResourceKind` and the schemaless `Record`
//! - `service.rs` - list/get/create/update/delete over a storage session
//! - `handlers.rs` - axum routes generated from the registry
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file in `definitions/`
//! 2. Implement the `ResourceDefinition` trait
//! 3. Register in `registry.rs`
//!
//! **No need to modify `service.rs` or `handlers.rs`!**

pub mod definitions;
mod error;
mod handlers;
mod models;
mod registry;
mod service;

pub use definitions::{ParentRelation, Reference, ResourceDefinition};
pub use error::{ResourceError, ResourceResult};
pub use handlers::{index_routes, resource_routes};
pub use models::{Record, RecordError, ResourceKind, UnknownKind};
pub use registry::{ResourceSpec, get_all_resources, spec_for};
pub use service::{Dict, ResourceService, parse_object, stats};
