use std::path::PathBuf;

use super::{logging_config::LoggingConfig, storage_config::StorageConfig};

/// Command line overrides; each one wins over its environment variable.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub in_memory: bool,
    pub storage_key: Option<String>,
}

pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let storage = StorageConfig::from_env();
        let logging = LoggingConfig::from_env(&storage.data_dir);
        Self { storage, logging }
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(data_dir) = overrides.data_dir {
            if std::env::var("CATALOG_LOG_DIR").is_err() {
                self.logging.log_dir = data_dir.join("logs");
            }
            self.storage.data_dir = data_dir;
        }
        if overrides.in_memory {
            self.storage.in_memory = true;
        }
        if let Some(key) = overrides.storage_key {
            self.storage.products_key = key;
        }
        self
    }
}
