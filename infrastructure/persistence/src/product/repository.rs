use std::sync::Arc;

use async_trait::async_trait;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::repository::ProductRepository;
use business::domain::product::value_objects::ProductId;

use super::entity::ProductEntity;
use crate::storage::key_value::KeyValueStorage;

/// Keeps the whole collection as one JSON array in a single storage slot.
///
/// Every write serializes the full collection. Two writers sharing a slot are
/// not coordinated: the last write wins for the whole collection.
pub struct ProductRepositoryLocalStorage {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl ProductRepositoryLocalStorage {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    async fn load(&self) -> Result<Vec<ProductEntity>, RepositoryError> {
        let raw = self.storage.get_item(&self.key).await.map_err(|e| {
            tracing::warn!(key = %self.key, error = %e, "failed to read products slot");
            RepositoryError::ReadFailure
        })?;

        match raw {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                tracing::warn!(key = %self.key, error = %e, "malformed products slot");
                RepositoryError::ReadFailure
            }),
        }
    }

    async fn persist(&self, entities: &[ProductEntity]) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(entities).map_err(|e| {
            tracing::warn!(key = %self.key, error = %e, "failed to encode products");
            RepositoryError::WriteFailure
        })?;

        self.storage
            .set_item(&self.key, &raw)
            .await
            .map_err(|e| {
                tracing::warn!(key = %self.key, error = %e, "failed to write products slot");
                RepositoryError::WriteFailure
            })
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryLocalStorage {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = self.load().await?;
        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        self.load()
            .await?
            .into_iter()
            .find(|e| e.id == id.as_str())
            .map(|e| e.into_domain())
            .ok_or(RepositoryError::NotFound)
    }

    async fn add(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut entities = self.load().await?;
        if entities.iter().any(|e| e.id == product.id.as_str()) {
            tracing::warn!(id = %product.id, "refusing to overwrite stored product on insert");
            return Err(RepositoryError::DuplicateId);
        }

        entities.push(ProductEntity::from(product));
        self.persist(&entities).await
    }

    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut entities = self.load().await?;
        let entity = ProductEntity::from(product);

        match entities.iter_mut().find(|e| e.id == entity.id) {
            Some(existing) => *existing = entity,
            None => entities.push(entity),
        }

        self.persist(&entities).await
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut entities = self.load().await?;
        let before = entities.len();
        entities.retain(|e| e.id != id.as_str());

        if entities.len() == before {
            tracing::debug!(%id, "delete of unknown product ignored");
            return Ok(());
        }

        self.persist(&entities).await
    }
}
