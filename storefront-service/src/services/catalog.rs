//! Catalog query layer over the product store.
//!
//! Existence checking and nothing else: no caching, no mutation. The
//! repository handle is injected at wiring time so tests can point it at
//! a private store.

use crate::models::{Product, ProductFilter};
use crate::services::ProductRepository;
use service_core::error::AppError;

#[derive(Clone)]
pub struct CatalogService {
    products: ProductRepository,
}

impl CatalogService {
    pub fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// All known products; an empty catalog is an empty list, not an error.
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.products.list().await
    }

    /// Products matching the given brand/category constraints.
    pub async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        if filter.is_empty() {
            return self.products.list().await;
        }
        self.products.search(filter).await
    }

    /// The product with the given id, or `NotFound`.
    pub async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Product with id {} not found", id)))
    }
}
