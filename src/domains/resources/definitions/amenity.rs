//! Amenity resource definition.

use super::{BASE_IGNORED, ResourceDefinition};
use crate::domains::resources::models::ResourceKind;

pub struct AmenityResource;

impl ResourceDefinition for AmenityResource {
    const KIND: ResourceKind = ResourceKind::Amenity;
    const COLLECTION: &'static str = "amenities";
    const REQUIRED: &'static [&'static str] = &["name"];
    const IGNORED_ON_UPDATE: &'static [&'static str] = &BASE_IGNORED;
}
