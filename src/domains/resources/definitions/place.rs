//! Place resource definition.

use super::{ParentRelation, Reference, ResourceDefinition};
use crate::domains::resources::models::ResourceKind;

/// Rental listing, created under a City and owned by a User.
///
/// `user_id` is checked before `name` and must name an existing user.
pub struct PlaceResource;

impl ResourceDefinition for PlaceResource {
    const KIND: ResourceKind = ResourceKind::Place;
    const COLLECTION: &'static str = "places";
    const REQUIRED: &'static [&'static str] = &["user_id", "name"];
    const IGNORED_ON_UPDATE: &'static [&'static str] =
        &["id", "user_id", "city_id", "created_at", "updated_at"];
    const PARENT: Option<ParentRelation> = Some(ParentRelation {
        kind: ResourceKind::City,
        collection: "cities",
        foreign_key: "city_id",
    });
    const REFERENCES: &'static [Reference] = &[Reference {
        field: "user_id",
        kind: ResourceKind::User,
    }];
}
