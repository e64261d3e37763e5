use std::sync::Arc;

use logger::TracingLogger;
use persistence::product::id_generator::TimestampIdGenerator;
use persistence::product::repository::ProductRepositoryLocalStorage;
use persistence::storage::key_value::KeyValueStorage;

use business::application::cache::query_cache::QueryCache;
use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_all::GetAllProductsUseCaseImpl;
use business::application::product::products_api::ProductsApi;
use business::application::product::update::UpdateProductUseCaseImpl;

use crate::page::image_probe::{ImageProbe, UrlImageProbe};

pub struct DependencyContainer {
    pub products_api: Arc<ProductsApi>,
    pub image_probe: Arc<dyn ImageProbe>,
}

impl DependencyContainer {
    pub fn new(storage: Arc<dyn KeyValueStorage>, products_key: &str) -> Self {
        let logger = Arc::new(TracingLogger);

        // Infrastructure adapters
        let product_repository = Arc::new(ProductRepositoryLocalStorage::new(storage, products_key));
        let id_generator = Arc::new(TimestampIdGenerator::new());

        // Product use cases
        let create_use_case = Arc::new(CreateProductUseCaseImpl {
            repository: product_repository.clone(),
            id_generator,
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetAllProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let update_use_case = Arc::new(UpdateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository,
            logger: logger.clone(),
        });

        let products_api = Arc::new(ProductsApi::new(
            get_all_use_case,
            create_use_case,
            update_use_case,
            delete_use_case,
            Arc::new(QueryCache::new()),
            logger,
        ));

        Self {
            products_api,
            image_probe: Arc::new(UrlImageProbe),
        }
    }
}
