//! Resource Registry - central registration of all resource kinds.
//!
//! When adding a new resource:
//! 1. Create the definition file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use super::definitions::{
    AmenityResource, CityResource, ParentRelation, PlaceResource, Reference, ResourceDefinition,
    ReviewResource, StateResource, UserResource,
};
use super::models::ResourceKind;

/// Runtime view of a [`ResourceDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    pub collection: &'static str,
    pub required: &'static [&'static str],
    pub ignored_on_update: &'static [&'static str],
    pub parent: Option<ParentRelation>,
    pub references: &'static [Reference],
}

impl ResourceSpec {
    /// Reference declared for a body field, if any.
    pub fn reference(&self, field: &str) -> Option<&'static Reference> {
        self.references.iter().find(|r| r.field == field)
    }

    /// Whether an update body key must be dropped.
    pub fn ignores(&self, key: &str) -> bool {
        self.ignored_on_update.contains(&key)
    }
}

fn build_spec<R: ResourceDefinition>() -> ResourceSpec {
    ResourceSpec {
        kind: R::KIND,
        collection: R::COLLECTION,
        required: R::REQUIRED,
        ignored_on_update: R::IGNORED_ON_UPDATE,
        parent: R::PARENT,
        references: R::REFERENCES,
    }
}

/// Get all registered resource kinds.
///
/// The order is the order of keys in `/stats`.
pub fn get_all_resources() -> Vec<ResourceSpec> {
    vec![
        build_spec::<UserResource>(),
        build_spec::<PlaceResource>(),
        build_spec::<StateResource>(),
        build_spec::<CityResource>(),
        build_spec::<AmenityResource>(),
        build_spec::<ReviewResource>(),
    ]
}

/// Find the spec registered for a kind.
pub fn spec_for(kind: ResourceKind) -> Option<ResourceSpec> {
    get_all_resources().into_iter().find(|spec| spec.kind == kind)
}
