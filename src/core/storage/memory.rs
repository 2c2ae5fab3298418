//! Process-local storage engine.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::engine::{Change, RecordTable, StorageEngine};
use super::StorageResult;
use crate::domains::resources::{Record, ResourceKind};

/// Storage engine keeping every record in memory.
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    table: RwLock<RecordTable>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageEngine for MemoryEngine {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, kind: ResourceKind, id: &str) -> StorageResult<Option<Record>> {
        Ok(self.table.read().await.get(kind, id).cloned())
    }

    async fn fetch_all(&self, kind: ResourceKind) -> StorageResult<Vec<Record>> {
        Ok(self.table.read().await.all(kind).to_vec())
    }

    async fn count(&self, kind: ResourceKind) -> StorageResult<usize> {
        Ok(self.table.read().await.count(kind))
    }

    async fn commit(&self, changes: Vec<Change>) -> StorageResult<()> {
        self.table.write().await.apply(changes);
        Ok(())
    }
}
