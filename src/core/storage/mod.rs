//! Persistence layer.
//!
//! - **engine**: the [`StorageEngine`] trait and the shared record table
//! - **memory** / **file**: the two engine implementations
//! - **session**: per-request unit of work (`get`, `all`, `stage`, `delete`,
//!   `save`, `count`)
//!
//! [`Storage`] is the cheaply cloneable handle passed to request handlers.

mod engine;
mod error;
mod file;
mod memory;
mod session;

pub use engine::{Change, RecordTable, StorageEngine};
pub use error::{StorageError, StorageResult};
pub use file::FileEngine;
pub use memory::MemoryEngine;
pub use session::Session;

use std::sync::Arc;
use tracing::info;

use crate::core::config::{StorageBackend, StorageConfig};

/// Handle to the configured storage engine.
#[derive(Clone)]
pub struct Storage {
    engine: Arc<dyn StorageEngine>,
}

impl Storage {
    /// Wrap an existing engine.
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { engine }
    }

    /// Storage backed by a fresh in-memory engine.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryEngine::new()))
    }

    /// Build the engine selected by configuration.
    pub async fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        let storage = match config.backend {
            StorageBackend::Memory => Self::memory(),
            StorageBackend::File => Self::new(Arc::new(FileEngine::open(&config.file_path).await?)),
        };
        info!("Storage engine: {}", storage.engine_name());
        Ok(storage)
    }

    /// Name of the underlying engine.
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Open a new session.
    pub fn open(&self) -> Session {
        Session::new(self.engine.clone())
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("engine", &self.engine.name())
            .finish()
    }
}
