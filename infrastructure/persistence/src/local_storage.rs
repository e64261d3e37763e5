use std::path::PathBuf;
use std::sync::Arc;

use crate::storage::file::FileStorage;
use crate::storage::key_value::{KeyValueStorage, StorageError, validate_key};
use crate::storage::memory::MemoryStorage;

/// Slot used when none is configured.
pub const DEFAULT_PRODUCTS_KEY: &str = "products";

/// Where the key-value slots live.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// One JSON file per slot in this directory.
    File(PathBuf),
    /// Nothing survives the process.
    Memory,
}

/// Configuration for the local storage
#[derive(Debug, Clone)]
pub struct LocalStorageConfig {
    pub backend: StorageBackend,
    pub products_key: String,
}

impl LocalStorageConfig {
    /// Creates a new storage configuration with the default slot key
    pub fn new(backend: StorageBackend) -> Self {
        Self {
            backend,
            products_key: DEFAULT_PRODUCTS_KEY.to_string(),
        }
    }

    pub fn with_products_key(mut self, key: impl Into<String>) -> Self {
        self.products_key = key.into();
        self
    }
}

/// Opens the configured backend, creating the data directory if needed.
pub async fn open_storage(
    config: &LocalStorageConfig,
) -> Result<Arc<dyn KeyValueStorage>, StorageError> {
    validate_key(&config.products_key)?;

    match &config.backend {
        StorageBackend::File(dir) => {
            tokio::fs::create_dir_all(dir).await?;
            tracing::info!(dir = %dir.display(), "using file storage");
            Ok(Arc::new(FileStorage::new(dir.clone())))
        }
        StorageBackend::Memory => {
            tracing::info!("using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}
