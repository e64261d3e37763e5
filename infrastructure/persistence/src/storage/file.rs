use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::key_value::{KeyValueStorage, StorageError, validate_key};

/// One JSON file per slot under a data directory.
///
/// Writes go to a hidden temp file that is then renamed over the slot, so a
/// reader never observes a half-written collection.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));

        fs::create_dir_all(&self.dir).await?;
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_return_none_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get_item("products").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_persist_slot_as_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("products", "[]").await.unwrap();

        let on_disk = std::fs::read_to_string(dir.path().join("nested/products.json")).unwrap();
        assert_eq!(on_disk, "[]");
        assert!(!dir.path().join("nested/.products.json.tmp").exists());
    }

    #[tokio::test]
    async fn should_read_back_what_was_written() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage
            .set_item("products", r#"[{"id":"1"}]"#)
            .await
            .unwrap();

        let reopened = FileStorage::new(dir.path());
        assert_eq!(
            reopened.get_item("products").await.unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }

    #[tokio::test]
    async fn should_ignore_removal_of_missing_slot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.remove_item("products").await.is_ok());
    }

    #[tokio::test]
    async fn should_reject_invalid_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let result = storage.set_item("../escape", "[]").await;

        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn should_fail_when_directory_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let storage = FileStorage::new(&blocker);

        let result = storage.set_item("products", "[]").await;

        assert!(matches!(result, Err(StorageError::Io(_))));
    }
}
