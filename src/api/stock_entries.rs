//! Stock arrival (entrada) endpoints.

use super::{ApiClient, Page, PeriodFilter};
use crate::error::ApiError;
use crate::models::{NewStockEntry, StockEntry};

/// Registers a stock arrival for a product.
pub async fn register(client: &ApiClient, entry: &NewStockEntry) -> Result<(), ApiError> {
    if entry.product_id.trim().is_empty() {
        return Err(ApiError::Validation("a product must be selected".into()));
    }
    if entry.quantity == 0 {
        return Err(ApiError::Validation("quantity must be positive".into()));
    }
    client.post_unit("/api/entradas", entry).await
}

/// Lists stock arrivals, optionally filtered by month and/or year.
pub async fn list(
    client: &ApiClient,
    filter: PeriodFilter,
    page: u32,
    size: u32,
) -> Result<Page<StockEntry>, ApiError> {
    let path = format!("/api/entradas{}", filter.path_suffix());
    let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
    filter.query(&mut query);
    client.get_json(&path, &query).await
}
