use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage.io_error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage.invalid_key: {0}")]
    InvalidKey(String),
}

/// String-keyed slots holding string values, the local analog of a browser's
/// local storage. Writes replace the whole slot.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// `Ok(None)` when the slot has never been written.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing an absent slot is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Slot keys double as file names, so they are restricted to a safe alphabet.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
