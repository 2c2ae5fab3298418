//! Resource definitions module.
//!
//! Each resource kind is defined in its own file as a set of constants:
//! collection path, required create fields, keys ignored on update, and
//! its parent relation if it is a child kind.
//!
//! ## Adding a New Resource
//!
//! 1. Add a variant to [`ResourceKind`]
//! 2. Create a new file (e.g., `my_resource.rs`) implementing `ResourceDefinition`
//! 3. Export it here
//! 4. Register in `registry.rs`

mod amenity;
mod city;
mod place;
mod review;
mod state;
mod user;

pub use amenity::AmenityResource;
pub use city::CityResource;
pub use place::PlaceResource;
pub use review::ReviewResource;
pub use state::StateResource;
pub use user::UserResource;

use super::models::ResourceKind;

/// Keys no update may touch, shared by every kind.
pub const BASE_IGNORED: [&str; 3] = ["id", "created_at", "updated_at"];

/// A child kind's link to its parent, fixed from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRelation {
    /// Kind of the parent resource.
    pub kind: ResourceKind,
    /// Path segment of the parent collection (e.g. `states`).
    pub collection: &'static str,
    /// Attribute on the child holding the parent id.
    pub foreign_key: &'static str,
}

/// A body field that must name an existing resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub kind: ResourceKind,
}

/// Trait for resource definitions.
///
/// Each resource kind implements this trait to describe how the generic
/// endpoints treat it.
pub trait ResourceDefinition {
    /// The kind this definition describes.
    const KIND: ResourceKind;

    /// Collection path segment, also the key in `/stats`.
    const COLLECTION: &'static str;

    /// Fields a create body must contain, in the order they are checked.
    const REQUIRED: &'static [&'static str];

    /// Keys silently dropped from update bodies.
    const IGNORED_ON_UPDATE: &'static [&'static str];

    /// Parent relation for kinds created under another resource.
    const PARENT: Option<ParentRelation> = None;

    /// Body fields resolved against storage on create.
    const REFERENCES: &'static [Reference] = &[];
}
