//! State resource definition.

use super::{BASE_IGNORED, ResourceDefinition};
use crate::domains::resources::models::ResourceKind;

/// Top-level geographic state.
pub struct StateResource;

impl ResourceDefinition for StateResource {
    const KIND: ResourceKind = ResourceKind::State;
    const COLLECTION: &'static str = "states";
    const REQUIRED: &'static [&'static str] = &["name"];
    const IGNORED_ON_UPDATE: &'static [&'static str] = &BASE_IGNORED;
}
