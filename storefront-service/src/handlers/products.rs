//! Product catalog handlers. Read-only: the catalog is seeded at startup
//! and no endpoint mutates it.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{ProductFilterQuery, ProductResponse},
    models::ProductFilter,
    AppState,
};

/// List the catalog, optionally narrowed by brand and/or category.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductFilterQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let filter = ProductFilter {
        brand: query.brand,
        category: query.category,
    };

    let products = state.catalog.search_products(&filter).await?;

    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Get a product by id. Unknown ids are 404; non-numeric ids are
/// rejected by the extractor before this handler runs.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, AppError> {
    tracing::debug!(product_id = id, "Fetching product");

    let product = state.catalog.get_product(id).await?;

    Ok(Json(ProductResponse::from(product)))
}
