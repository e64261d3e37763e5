use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::Product;
use super::value_objects::ProductId;

/// Persistence port for the product collection.
///
/// The collection is ordered by insertion. `add` appends and refuses an id that
/// is already stored. `save` appends a product whose id is unknown and replaces
/// an existing one in place. `delete` of an unknown id is not an error.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError>;
    async fn add(&self, product: &Product) -> Result<(), RepositoryError>;
    async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError>;
}
