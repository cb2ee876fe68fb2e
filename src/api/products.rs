//! Product (estoque) endpoints.

use super::{ApiClient, Page};
use crate::error::ApiError;
use crate::models::{NewProduct, Product};

/// Lists products, one page at a time. `page` is zero-based.
pub async fn list(client: &ApiClient, page: u32, size: u32) -> Result<Page<Product>, ApiError> {
    client
        .get_json(
            "/api/produtos",
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
}

/// Lists products whose name matches `name`, for incremental pickers.
pub async fn search(
    client: &ApiClient,
    name: &str,
    page: u32,
    size: u32,
) -> Result<Page<Product>, ApiError> {
    client
        .get_json(
            "/api/produtos",
            &[
                ("nome", name.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ],
        )
        .await
}

pub async fn create(client: &ApiClient, product: &NewProduct) -> Result<Product, ApiError> {
    if product.name.trim().is_empty() {
        return Err(ApiError::Validation("product name is required".into()));
    }
    if product.price <= 0.0 {
        return Err(ApiError::Validation("price must be positive".into()));
    }
    client.post_json("/api/produtos", product).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    product: &Product,
) -> Result<Product, ApiError> {
    client
        .put_json(&format!("/api/produtos/{}", id), product)
        .await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/api/produtos/{}", id)).await
}
