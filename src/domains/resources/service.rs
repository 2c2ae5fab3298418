//! Resource service implementation.
//!
//! One [`ResourceService`] serves one resource kind. Every kind goes through
//! the same list/get/create/update/delete code, parameterized by its
//! [`ResourceSpec`]. Validation always completes before anything is staged,
//! so a rejected request never reaches `save`.

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::error::{ResourceError, ResourceResult};
use super::models::{Record, ResourceKind};
use super::registry::{ResourceSpec, get_all_resources};
use crate::core::storage::Session;

/// JSON object as returned by `to_dict`.
pub type Dict = Map<String, Value>;

/// Generic endpoint contract for a single resource kind.
#[derive(Debug, Clone, Copy)]
pub struct ResourceService {
    spec: ResourceSpec,
}

impl ResourceService {
    pub fn new(spec: ResourceSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &ResourceSpec {
        &self.spec
    }

    /// List every instance, restricted to one parent when `parent_id` is set.
    #[instrument(skip(self, session), fields(kind = %self.spec.kind))]
    pub async fn list(&self, session: &Session, parent_id: Option<&str>) -> ResourceResult<Vec<Dict>> {
        let parent = match (self.spec.parent, parent_id) {
            (Some(relation), Some(parent_id)) => {
                self.require(session, relation.kind, parent_id).await?;
                Some((relation.foreign_key, parent_id))
            }
            _ => None,
        };

        let records = session.all(self.spec.kind).await?;
        let listed: Vec<Dict> = records
            .iter()
            .filter(|record| match parent {
                Some((foreign_key, parent_id)) => record.get_str(foreign_key) == Some(parent_id),
                None => true,
            })
            .map(Record::to_dict)
            .collect();

        debug!("Listed {} records", listed.len());
        Ok(listed)
    }

    /// Fetch one instance.
    #[instrument(skip(self, session), fields(kind = %self.spec.kind))]
    pub async fn get(&self, session: &Session, id: &str) -> ResourceResult<Dict> {
        let record = self.require(session, self.spec.kind, id).await?;
        Ok(record.to_dict())
    }

    /// Validate a create body and persist the new instance.
    ///
    /// Checks run in this order: parent exists, body is a JSON object, then
    /// each required field in declared order. A required field that
    /// references another resource is resolved right after its presence
    /// check.
    #[instrument(skip(self, session, body), fields(kind = %self.spec.kind))]
    pub async fn create(
        &self,
        session: &mut Session,
        parent_id: Option<&str>,
        body: &[u8],
    ) -> ResourceResult<Dict> {
        let parent = match self.spec.parent {
            Some(relation) => {
                let Some(parent_id) = parent_id else {
                    return Err(ResourceError::missing(relation.foreign_key));
                };
                self.require(session, relation.kind, parent_id).await?;
                Some((relation.foreign_key, parent_id))
            }
            None => None,
        };

        let fields = parse_object(body)?;

        for field in self.spec.required {
            let value = match fields.get(*field) {
                Some(value) if !value.is_null() => value,
                _ => {
                    warn!("Rejected create: missing {}", field);
                    return Err(ResourceError::missing(field));
                }
            };

            if let Some(reference) = self.spec.reference(field) {
                let id = value
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                self.require(session, reference.kind, &id).await?;
            }
        }

        let mut record = Record::new(self.spec.kind, fields);
        if let Some((foreign_key, parent_id)) = parent {
            record.set(foreign_key, Value::String(parent_id.to_string()));
        }

        let dict = record.to_dict();
        let id = record.id().to_string();
        session.stage(record);
        session.save().await?;

        info!("Created {} {}", self.spec.kind, id);
        Ok(dict)
    }

    /// Apply every non-ignored body key onto an existing instance.
    #[instrument(skip(self, session, body), fields(kind = %self.spec.kind))]
    pub async fn update(&self, session: &mut Session, id: &str, body: &[u8]) -> ResourceResult<Dict> {
        let mut record = self.require(session, self.spec.kind, id).await?;
        let fields = parse_object(body)?;

        for (key, value) in fields {
            if self.spec.ignores(&key) {
                debug!("Ignoring immutable key {}", key);
                continue;
            }
            record.set(key, value);
        }

        let dict = record.to_dict();
        session.stage(record);
        session.save().await?;

        info!("Updated {} {}", self.spec.kind, id);
        Ok(dict)
    }

    /// Remove an instance. A second delete of the same id is NotFound.
    #[instrument(skip(self, session), fields(kind = %self.spec.kind))]
    pub async fn delete(&self, session: &mut Session, id: &str) -> ResourceResult<()> {
        let record = self.require(session, self.spec.kind, id).await?;
        session.delete(&record);
        session.save().await?;

        info!("Deleted {} {}", self.spec.kind, id);
        Ok(())
    }

    async fn require(
        &self,
        session: &Session,
        kind: ResourceKind,
        id: &str,
    ) -> ResourceResult<Record> {
        session
            .get(kind, id)
            .await?
            .ok_or_else(|| ResourceError::not_found(kind, id))
    }
}

/// Parse a request body that must be a JSON object.
pub fn parse_object(body: &[u8]) -> ResourceResult<Dict> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => Err(ResourceError::not_a_json()),
    }
}

/// Count of every kind, keyed by collection name.
#[instrument(skip(session))]
pub async fn stats(session: &Session) -> ResourceResult<Dict> {
    let mut counts = Map::new();
    for spec in get_all_resources() {
        let count = session.count(spec.kind).await?;
        counts.insert(spec.collection.to_string(), Value::from(count));
    }
    Ok(counts)
}
