use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use persistence::local_storage::{
    DEFAULT_PRODUCTS_KEY, LocalStorageConfig, StorageBackend, open_storage,
};
use persistence::storage::key_value::KeyValueStorage;

/// Storage configuration for the products slot
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub in_memory: bool,
    pub products_key: String,
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    ///
    /// Environment variables:
    /// - CATALOG_STORAGE: "file" or "memory" (default: "file")
    /// - CATALOG_DATA_DIR: directory holding the slot files (default: platform data dir)
    /// - CATALOG_STORAGE_KEY: name of the products slot (default: "products")
    pub fn from_env() -> Self {
        let in_memory = env::var("CATALOG_STORAGE")
            .map(|backend| backend.eq_ignore_ascii_case("memory"))
            .unwrap_or(false);
        let data_dir = env::var("CATALOG_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());
        let products_key =
            env::var("CATALOG_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_PRODUCTS_KEY.to_string());

        Self {
            data_dir,
            in_memory,
            products_key,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        if self.in_memory {
            StorageBackend::Memory
        } else {
            StorageBackend::File(self.data_dir.clone())
        }
    }
}

/// Platform data directory, falling back to `~/.local/share`, then `.`.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("product-catalog")
}

/// Initialize the key-value storage from the storage configuration
///
/// # Errors
/// Returns error if the data directory cannot be created or the slot key is invalid
pub async fn init_storage(config: &StorageConfig) -> anyhow::Result<Arc<dyn KeyValueStorage>> {
    let local = LocalStorageConfig::new(config.backend())
        .with_products_key(config.products_key.clone());
    let storage = open_storage(&local).await?;
    Ok(storage)
}
