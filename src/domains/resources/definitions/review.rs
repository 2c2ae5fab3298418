//! Review resource definition.

use super::{ParentRelation, Reference, ResourceDefinition};
use crate::domains::resources::models::ResourceKind;

/// Review of a Place written by a User.
pub struct ReviewResource;

impl ResourceDefinition for ReviewResource {
    const KIND: ResourceKind = ResourceKind::Review;
    const COLLECTION: &'static str = "reviews";
    const REQUIRED: &'static [&'static str] = &["user_id", "text"];
    const IGNORED_ON_UPDATE: &'static [&'static str] =
        &["id", "user_id", "place_id", "created_at", "updated_at"];
    const PARENT: Option<ParentRelation> = Some(ParentRelation {
        kind: ResourceKind::Place,
        collection: "places",
        foreign_key: "place_id",
    });
    const REFERENCES: &'static [Reference] = &[Reference {
        field: "user_id",
        kind: ResourceKind::User,
    }];
}
