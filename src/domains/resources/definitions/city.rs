//! City resource definition.

use super::{ParentRelation, ResourceDefinition};
use crate::domains::resources::models::ResourceKind;

/// City, created under a State.
pub struct CityResource;

impl ResourceDefinition for CityResource {
    const KIND: ResourceKind = ResourceKind::City;
    const COLLECTION: &'static str = "cities";
    const REQUIRED: &'static [&'static str] = &["name"];
    const IGNORED_ON_UPDATE: &'static [&'static str] =
        &["id", "state_id", "created_at", "updated_at"];
    const PARENT: Option<ParentRelation> = Some(ParentRelation {
        kind: ResourceKind::State,
        collection: "states",
        foreign_key: "state_id",
    });
}
