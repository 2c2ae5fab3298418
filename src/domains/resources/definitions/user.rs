//! User resource definition.

use super::ResourceDefinition;
use crate::domains::resources::models::ResourceKind;

/// Account owning places and writing reviews.
///
/// The email is fixed once the user exists.
pub struct UserResource;

impl ResourceDefinition for UserResource {
    const KIND: ResourceKind = ResourceKind::User;
    const COLLECTION: &'static str = "users";
    const REQUIRED: &'static [&'static str] = &["email", "password"];
    const IGNORED_ON_UPDATE: &'static [&'static str] =
        &["id", "email", "created_at", "updated_at"];
}
