use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{NewProductProps, Product};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::services::ProductIdGenerator;
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};

/// Fresh ids drawn before giving up when the store keeps reporting a clash.
const MAX_ID_ATTEMPTS: usize = 5;

pub struct CreateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub id_generator: Arc<dyn ProductIdGenerator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Creating product: {}", params.name));

        let mut product = Product::new(
            self.id_generator.next_id(),
            NewProductProps {
                name: params.name,
                description: params.description,
                price: params.price,
                category: params.category,
                image_url: params.image_url,
            },
        )?;

        let mut attempts = 1;
        loop {
            match self.repository.add(&product).await {
                Ok(()) => break,
                Err(RepositoryError::DuplicateId) if attempts < MAX_ID_ATTEMPTS => {
                    self.logger.warn(&format!(
                        "Product id {} already stored, drawing a new one",
                        product.id
                    ));
                    product.id = self.id_generator.next_id();
                    attempts += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.logger
            .info(&format!("Product created with id: {}", product.id));
        Ok(product)
    }
}
