//! Employee roster endpoints.

use serde::Serialize;

use super::{ApiClient, Page};
use crate::error::ApiError;
use crate::models::Employee;

#[derive(Serialize)]
struct EmployeePayload<'a> {
    nome: &'a str,
}

pub async fn list(client: &ApiClient, page: u32, size: u32) -> Result<Page<Employee>, ApiError> {
    client
        .get_json(
            "/api/funcionarios",
            &[("page", page.to_string()), ("size", size.to_string())],
        )
        .await
}

/// Searches the roster by name. The name goes into the URL by hand, so it is
/// percent-encoded here rather than left to the query serializer.
pub async fn search(
    client: &ApiClient,
    name: &str,
    page: u32,
    size: u32,
) -> Result<Page<Employee>, ApiError> {
    let path = format!(
        "/api/funcionarios/buscar?nome={}",
        urlencoding::encode(name.trim())
    );
    client
        .get_json(&path, &[("page", page.to_string()), ("size", size.to_string())])
        .await
}

pub async fn create(client: &ApiClient, name: &str) -> Result<Employee, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("employee name is required".into()));
    }
    client
        .post_json("/api/funcionarios", &EmployeePayload { nome: name })
        .await
}

pub async fn rename(client: &ApiClient, id: &str, name: &str) -> Result<Employee, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("employee name is required".into()));
    }
    client
        .put_json(
            &format!("/api/funcionarios/{}", id),
            &EmployeePayload { nome: name },
        )
        .await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/api/funcionarios/{}", id)).await
}
