//! JSON file storage engine.
//!
//! All records live in one JSON object keyed `"<Class>.<id>"`, each value
//! being the record's `to_dict` form. The whole file is rewritten after
//! every commit and read back once at startup.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::engine::{Change, RecordTable, StorageEngine};
use super::{StorageError, StorageResult};
use crate::domains::resources::{Record, RecordError, ResourceKind};

/// Storage engine persisting records to a JSON file.
#[derive(Debug)]
pub struct FileEngine {
    path: PathBuf,
    table: RwLock<RecordTable>,
}

impl FileEngine {
    /// Open the engine, loading existing records from `path`.
    ///
    /// A missing file is treated as an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let table = load_table(&path).await?;
        info!(
            "Loaded {} records from {}",
            table.iter().count(),
            path.display()
        );

        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }
}

async fn load_table(path: &Path) -> StorageResult<RecordTable> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(RecordTable::new()),
        Err(e) => return Err(StorageError::io(path.display().to_string(), e)),
    };

    let entries: Map<String, Value> = serde_json::from_slice(&raw)?;
    let mut table = RecordTable::new();
    for (key, value) in entries {
        let dict = match value {
            Value::Object(dict) => dict,
            other => {
                return Err(StorageError::corrupt(
                    key,
                    RecordError::Invalid(format!("expected object, got {other}")),
                ));
            }
        };
        let record = Record::from_dict(dict).map_err(|e| StorageError::corrupt(&key, e))?;
        table.upsert(record);
    }
    Ok(table)
}

fn encode_table(table: &RecordTable) -> StorageResult<Vec<u8>> {
    let entries: Map<String, Value> = table
        .iter()
        .map(|record| {
            (
                format!("{}.{}", record.kind().class_name(), record.id()),
                Value::Object(record.to_dict()),
            )
        })
        .collect();
    Ok(serde_json::to_vec(&entries)?)
}

#[async_trait]
impl StorageEngine for FileEngine {
    fn name(&self) -> &'static str {
        "file"
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
        // Held across the write so commits reach the file in order.
        let mut table = self.table.write().await;

        let mut next = table.clone();
        next.apply(changes);
        let bytes = encode_table(&next)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| StorageError::io(self.path.display().to_string(), e))?;

        *table = next;
        debug!("Wrote {} to disk", self.path.display());
        Ok(())
    }
}
