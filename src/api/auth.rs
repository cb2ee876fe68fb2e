//! Sign-in and sign-out against the backend's login endpoint.
//!
//! Sign-in bypasses the global 401 interception: a 401 from `/api/login`
//! means the credentials were wrong, not that an existing session expired.

use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::error::ApiError;
use crate::session::display_name_for;

#[derive(Serialize)]
struct LoginRequest<'a> {
    login: &'a str,
    senha: &'a str,
}

/// Authenticates against `POST /api/login` and, on success, establishes the
/// session with the returned token. On rejection the session is left
/// untouched and [`ApiError::InvalidCredentials`] is returned to the caller.
pub async fn sign_in(client: &ApiClient, login: &str, secret: &str) -> Result<(), ApiError> {
    if login.trim().is_empty() || secret.is_empty() {
        return Err(ApiError::Validation(
            "login and password are required".into(),
        ));
    }

    let response = client
        .send_unintercepted(Method::POST, "/api/login", &LoginRequest { login, senha: secret })
        .await?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        log::info!("sign-in rejected for {}", login);
        return Err(ApiError::InvalidCredentials);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::UnexpectedStatus { status, body });
    }

    // The body is the bearer token itself; tolerate a JSON-quoted string.
    let token = response.text().await?.trim().trim_matches('"').to_string();
    client
        .session()
        .establish(token, display_name_for(login))?;
    log::info!("signed in as {}", login);
    Ok(())
}

/// Clears the local session. There is no server-side logout endpoint; the
/// token simply stops being sent.
pub fn sign_out(client: &ApiClient) {
    client.session().sign_out();
}
