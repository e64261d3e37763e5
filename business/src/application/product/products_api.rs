//! Data-access facade used by the presentation layer.
//!
//! `get_products` provides the `Product` cache tag; every mutation invalidates
//! it once the underlying use case has finished, successful or not.

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::cache::cached_query::CachedQuery;
use crate::application::cache::query_cache::{CacheTag, QueryCache};
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductChanges};
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use crate::domain::product::use_cases::get_all::GetAllProductsUseCase;
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};
use crate::domain::product::value_objects::ProductId;

const PRODUCT_TAGS: &[CacheTag] = &[CacheTag::Product];

pub struct ProductsApi {
    get_all_use_case: Arc<dyn GetAllProductsUseCase>,
    create_use_case: Arc<dyn CreateProductUseCase>,
    update_use_case: Arc<dyn UpdateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    cache: Arc<QueryCache>,
    products: CachedQuery<Vec<Product>>,
    logger: Arc<dyn Logger>,
}

impl ProductsApi {
    pub fn new(
        get_all_use_case: Arc<dyn GetAllProductsUseCase>,
        create_use_case: Arc<dyn CreateProductUseCase>,
        update_use_case: Arc<dyn UpdateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        cache: Arc<QueryCache>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            get_all_use_case,
            create_use_case,
            update_use_case,
            delete_use_case,
            cache,
            products: CachedQuery::new(CacheTag::Product),
            logger,
        }
    }

    /// Full ordered collection, served from memory until the next mutation.
    pub async fn get_products(&self) -> Result<Vec<Product>, ProductError> {
        self.products
            .fetch(&self.cache, || self.get_all_use_case.execute())
            .await
            .inspect_err(|e| self.logger.warn(&format!("get_products failed: {}", e)))
    }

    pub async fn create_product(
        &self,
        params: CreateProductParams,
    ) -> Result<Product, ProductError> {
        let result = self.create_use_case.execute(params).await;
        self.finish_mutation("create_product", &result);
        result
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Product, ProductError> {
        let result = self
            .update_use_case
            .execute(UpdateProductParams { id, changes })
            .await;
        self.finish_mutation("update_product", &result);
        result
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        let result = self
            .delete_use_case
            .execute(DeleteProductParams { id })
            .await;
        self.finish_mutation("delete_product", &result);
        result
    }

    /// Wakes on every invalidation of the product list.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.cache.subscribe(CacheTag::Product)
    }

    fn finish_mutation<T>(&self, operation: &str, result: &Result<T, ProductError>) {
        if let Err(e) = result {
            self.logger.warn(&format!("{} failed: {}", operation, e));
        }
        self.cache.invalidate(PRODUCT_TAGS);
        self.logger.debug(&format!(
            "{} invalidated tag {} (generation {})",
            operation,
            CacheTag::Product,
            self.cache.generation(CacheTag::Product)
        ));
    }
}
