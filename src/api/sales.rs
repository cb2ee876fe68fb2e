//! Sale (venda) endpoints.

use super::{ApiClient, Page, PeriodFilter};
use crate::error::ApiError;
use crate::models::{NewSale, Sale};

/// Registers a sale at the counter.
pub async fn register(client: &ApiClient, sale: &NewSale) -> Result<(), ApiError> {
    if sale.employee_id.trim().is_empty() {
        return Err(ApiError::Validation("an employee must be selected".into()));
    }
    if sale.products.is_empty() {
        return Err(ApiError::Validation("a sale needs at least one item".into()));
    }
    if sale.products.iter().any(|item| item.quantity == 0) {
        return Err(ApiError::Validation("item quantity must be positive".into()));
    }
    client.post_unit("/api/vendas", sale).await
}

/// Lists recorded sales, optionally filtered by month and/or year.
pub async fn list(
    client: &ApiClient,
    filter: PeriodFilter,
    page: u32,
    size: u32,
) -> Result<Page<Sale>, ApiError> {
    let path = format!("/api/vendas{}", filter.path_suffix());
    let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
    filter.query(&mut query);
    client.get_json(&path, &query).await
}
