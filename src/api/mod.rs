//! HTTP client wrapper and endpoint modules.
//!
//! [`ApiClient`] centralizes the base URL, attaches the current bearer token
//! to every outgoing request, and inspects every response: a 401 means the
//! session is no longer valid, so a [`AuthEvent::SessionInvalid`] is
//! published (exactly once per response) before the error reaches the
//! caller. Individual pages never have to detect expiry themselves.

pub mod auth;
pub mod employees;
pub mod products;
pub mod reports;
pub mod sales;
pub mod stock_entries;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use crate::config::Config;
use crate::error::ApiError;
use crate::events::{AuthEvent, AuthEventBus};
use crate::session::SessionStore;

/// Pagination envelope returned by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    pub last: bool,
}

/// Month/year filtering for the entradas and vendas list endpoints. The
/// backend exposes a separate path per combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodFilter {
    #[default]
    All,
    Month(u32),
    Year(i32),
    MonthYear {
        month: u32,
        year: i32,
    },
}

impl PeriodFilter {
    fn path_suffix(&self) -> &'static str {
        match self {
            PeriodFilter::All => "",
            PeriodFilter::Month(_) => "/filtrar/mes",
            PeriodFilter::Year(_) => "/filtrar/ano",
            PeriodFilter::MonthYear { .. } => "/filtrar",
        }
    }

    fn query(&self, query: &mut Vec<(&'static str, String)>) {
        match *self {
            PeriodFilter::All => {}
            PeriodFilter::Month(month) => query.push(("mes", month.to_string())),
            PeriodFilter::Year(year) => query.push(("ano", year.to_string())),
            PeriodFilter::MonthYear { month, year } => {
                query.push(("mes", month.to_string()));
                query.push(("ano", year.to_string()));
            }
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    events: Arc<AuthEventBus>,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        session: Arc<SessionStore>,
        events: Arc<AuthEventBus>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            events,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a request with the current bearer token attached. The token is
    /// read from the store per request, so a session change is visible to
    /// every subsequent call.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Sends an authenticated request and applies the uniform status policy:
    /// 401 publishes a session-invalid event and maps to `SessionExpired`,
    /// other error statuses map to `UnexpectedStatus`.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("backend answered 401, invalidating session");
            self.events.publish(AuthEvent::SessionInvalid);
            return Err(ApiError::SessionExpired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("backend error {}: {}", status, body);
            return Err(ApiError::UnexpectedStatus { status, body });
        }

        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Sends a request without the 401 interception. Only the login endpoint
    /// uses this: a 401 there means bad credentials, not an expired session,
    /// and must not tear anything down.
    pub(crate) async fn send_unintercepted(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Response, ApiError> {
        let response = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_filter_paths() {
        assert_eq!(PeriodFilter::All.path_suffix(), "");
        assert_eq!(PeriodFilter::Month(3).path_suffix(), "/filtrar/mes");
        assert_eq!(PeriodFilter::Year(2025).path_suffix(), "/filtrar/ano");
        assert_eq!(
            PeriodFilter::MonthYear { month: 3, year: 2025 }.path_suffix(),
            "/filtrar"
        );
    }

    #[test]
    fn test_period_filter_query() {
        let mut query = vec![("page", "0".to_string())];
        PeriodFilter::MonthYear { month: 7, year: 2025 }.query(&mut query);
        assert_eq!(
            query,
            vec![
                ("page", "0".to_string()),
                ("mes", "7".to_string()),
                ("ano", "2025".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_envelope_decodes() {
        let raw = r#"{"content":[1,2,3],"totalPages":4,"last":false}"#;
        let page: Page<u32> = serde_json::from_str(raw).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_pages, 4);
        assert!(!page.last);
    }
}
