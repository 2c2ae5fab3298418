//! Per-request storage sessions.

use std::sync::Arc;
use tracing::{debug, warn};

use super::StorageResult;
use super::engine::{Change, StorageEngine};
use crate::domains::resources::{Record, ResourceKind};

/// A unit of work against a storage engine.
///
/// Reads see committed state overlaid with this session's own staged
/// changes. Nothing reaches the engine until [`Session::save`]. Dropping the
/// session releases it and discards anything still staged.
pub struct Session {
    engine: Arc<dyn StorageEngine>,
    staged: Vec<Change>,
}

impl Session {
    pub(super) fn new(engine: Arc<dyn StorageEngine>) -> Self {
        debug!("Opened {} storage session", engine.name());
        Self {
            engine,
            staged: Vec::new(),
        }
    }

    /// Look up a record by kind and id.
    pub async fn get(&self, kind: ResourceKind, id: &str) -> StorageResult<Option<Record>> {
        if let Some(change) = self.staged.iter().rev().find(|c| c.targets(kind, id)) {
            return Ok(match change {
                Change::Upsert(record) => Some(record.clone()),
                Change::Remove { .. } => None,
            });
        }
        self.engine.fetch(kind, id).await
    }

    /// Every record of a kind, in insertion order.
    pub async fn all(&self, kind: ResourceKind) -> StorageResult<Vec<Record>> {
        let mut records = self.engine.fetch_all(kind).await?;
        for change in &self.staged {
            match change {
                Change::Upsert(record) if record.kind() == kind => {
                    match records.iter_mut().find(|r| r.id() == record.id()) {
                        Some(existing) => *existing = record.clone(),
                        None => records.push(record.clone()),
                    }
                }
                Change::Remove { kind: k, id } if *k == kind => {
                    records.retain(|r| r.id() != id);
                }
                _ => {}
            }
        }
        Ok(records)
    }

    /// Number of records of a kind.
    pub async fn count(&self, kind: ResourceKind) -> StorageResult<usize> {
        if self.staged.is_empty() {
            return self.engine.count(kind).await;
        }
        Ok(self.all(kind).await?.len())
    }

    /// Stage a new or modified record for the next save.
    pub fn stage(&mut self, record: Record) {
        self.staged.push(Change::Upsert(record));
    }

    /// Stage removal of a record.
    pub fn delete(&mut self, record: &Record) {
        self.staged.push(Change::Remove {
            kind: record.kind(),
            id: record.id().to_string(),
        });
    }

    /// Commit every staged change.
    pub async fn save(&mut self) -> StorageResult<()> {
        if self.staged.is_empty() {
            return Ok(());
        }
        let changes = std::mem::take(&mut self.staged);
        debug!("Committing {} staged changes", changes.len());
        self.engine.commit(changes).await
    }

    /// Number of changes waiting for `save`.
    pub fn pending(&self) -> usize {
        self.staged.len()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.staged.is_empty() {
            warn!(
                "Discarding {} uncommitted changes on session release",
                self.staged.len()
            );
        }
        debug!("Released {} storage session", self.engine.name());
    }
}
