//! Storage engine abstraction.
//!
//! Engines own committed state. Request handlers never talk to an engine
//! directly; they go through a [`Session`](super::Session), which stages
//! changes and commits them in one call.

use async_trait::async_trait;
use std::collections::HashMap;

use super::StorageResult;
use crate::domains::resources::{Record, ResourceKind};

/// A staged mutation waiting for `save`.
#[derive(Debug, Clone)]
pub enum Change {
    /// Insert a new record or replace the one with the same kind and id.
    Upsert(Record),
    /// Remove a record.
    Remove { kind: ResourceKind, id: String },
}

impl Change {
    /// Whether this change targets the given record.
    pub fn targets(&self, kind: ResourceKind, id: &str) -> bool {
        match self {
            Self::Upsert(record) => record.kind() == kind && record.id() == id,
            Self::Remove { kind: k, id: i } => *k == kind && i == id,
        }
    }
}

/// Backing store for committed records.
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch a single committed record.
    async fn fetch(&self, kind: ResourceKind, id: &str) -> StorageResult<Option<Record>>;

    /// Fetch every committed record of a kind, in insertion order.
    async fn fetch_all(&self, kind: ResourceKind) -> StorageResult<Vec<Record>>;

    /// Number of committed records of a kind.
    async fn count(&self, kind: ResourceKind) -> StorageResult<usize>;

    /// Apply a batch of changes atomically with respect to other commits.
    async fn commit(&self, changes: Vec<Change>) -> StorageResult<()>;
}

/// In-memory record table shared by the engines.
///
/// Records are kept per kind in insertion order. Replacing a record keeps
/// its original position.
#[derive(Debug, Default, Clone)]
pub struct RecordTable {
    records: HashMap<ResourceKind, Vec<Record>>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind, id: &str) -> Option<&Record> {
        self.records
            .get(&kind)
            .and_then(|records| records.iter().find(|r| r.id() == id))
    }

    pub fn all(&self, kind: ResourceKind) -> &[Record] {
        self.records.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.all(kind).len()
    }

    /// Insert or replace a record.
    pub fn upsert(&mut self, record: Record) {
        let records = self.records.entry(record.kind()).or_default();
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Remove a record, returning whether it existed.
    pub fn remove(&mut self, kind: ResourceKind, id: &str) -> bool {
        let Some(records) = self.records.get_mut(&kind) else {
            return false;
        };
        let before = records.len();
        records.retain(|r| r.id() != id);
        records.len() != before
    }

    pub fn apply(&mut self, changes: Vec<Change>) {
        for change in changes {
            match change {
                Change::Upsert(record) => self.upsert(record),
                Change::Remove { kind, id } => {
                    self.remove(kind, &id);
                }
            }
        }
    }

    /// Every record, grouped by kind in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        ResourceKind::ALL
            .into_iter()
            .flat_map(move |kind| self.all(kind).iter())
    }
}
