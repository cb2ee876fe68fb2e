//! End-to-end session behavior against an in-process mock backend.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use cantina::api;
use cantina::config::Config;
use cantina::error::ApiError;
use cantina::routes::{self, Route};
use cantina::App;

const VALID_TOKEN: &str = "tok-integration-1";

#[derive(Clone, Default)]
struct Backend {
    valid_tokens: Arc<Mutex<HashSet<String>>>,
}

impl Backend {
    /// Simulates server-side expiry of every issued token.
    fn revoke_all(&self) {
        self.valid_tokens.lock().unwrap().clear();
    }
}

#[derive(Deserialize)]
struct LoginBody {
    login: String,
    senha: String,
}

async fn login(
    State(backend): State<Backend>,
    Json(body): Json<LoginBody>,
) -> (StatusCode, String) {
    if body.login == "nadia@gmail.com" && body.senha == "1234" {
        backend
            .valid_tokens
            .lock()
            .unwrap()
            .insert(VALID_TOKEN.to_string());
        (StatusCode::OK, VALID_TOKEN.to_string())
    } else {
        (StatusCode::UNAUTHORIZED, String::new())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn list_products(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> (StatusCode, Json<serde_json::Value>) {
    let authorized = bearer_token(&headers)
        .map(|token| backend.valid_tokens.lock().unwrap().contains(&token))
        .unwrap_or(false);

    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }

    (
        StatusCode::OK,
        Json(json!({
            "content": [
                {"id": "p1", "nome": "Coxinha", "categoria": "LANCHES", "preco": 5.5, "quantidade": 12},
                {"id": "p2", "nome": "Suco", "categoria": "BEBIDAS", "preco": 4.0, "quantidade": 30},
            ],
            "totalPages": 3,
            "last": false,
        })),
    )
}

async fn spawn_backend() -> (Backend, String) {
    let backend = Backend::default();
    let router = Router::new()
        .route("/api/login", post(login))
        .route("/api/produtos", get(list_products))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (backend, format!("http://{}", addr))
}

fn app_for(base_url: &str, dir: &tempfile::TempDir) -> App {
    let config = Config::with_base_url(base_url, dir.path().join("session.json"));
    App::new(&config).unwrap()
}

#[tokio::test]
async fn sign_in_establishes_and_persists_the_session() {
    let (_backend, base_url) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&base_url, &dir);

    assert!(!app.session.is_authenticated());
    api::auth::sign_in(&app.client, "nadia@gmail.com", "1234")
        .await
        .unwrap();

    assert!(app.session.is_authenticated());
    assert_eq!(app.session.token().as_deref(), Some(VALID_TOKEN));
    assert_eq!(app.session.display_name().as_deref(), Some("Nadia"));

    // A fresh context restores the persisted session without a new login.
    let restored = app_for(&base_url, &dir);
    assert!(restored.session.is_authenticated());
    assert_eq!(restored.session.token().as_deref(), Some(VALID_TOKEN));
}

#[tokio::test]
async fn rejected_sign_in_leaves_the_session_signed_out() {
    let (_backend, base_url) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&base_url, &dir);

    let result = api::auth::sign_in(&app.client, "nadia@gmail.com", "wrong").await;
    assert!(matches!(result, Err(ApiError::InvalidCredentials)));
    assert!(!app.session.is_authenticated());
    assert!(app.session.token().is_none());
}

#[tokio::test]
async fn authenticated_requests_carry_the_bearer_token() {
    let (_backend, base_url) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&base_url, &dir);

    api::auth::sign_in(&app.client, "nadia@gmail.com", "1234")
        .await
        .unwrap();

    let page = api::products::list(&app.client, 0, 10).await.unwrap();
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].name, "Coxinha");
    assert_eq!(page.total_pages, 3);
    assert!(!page.last);
}

#[tokio::test]
async fn requests_without_a_session_are_rejected_and_stay_signed_out() {
    let (_backend, base_url) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&base_url, &dir);

    let result = api::products::list(&app.client, 0, 10).await;
    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(!app.session.is_authenticated());
}

#[tokio::test]
async fn a_401_after_login_tears_down_the_session_and_gates_navigation() {
    let (backend, base_url) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&base_url, &dir);

    api::auth::sign_in(&app.client, "nadia@gmail.com", "1234")
        .await
        .unwrap();
    assert_eq!(routes::resolve(&app.session, Route::Stock), Route::Stock);

    backend.revoke_all();

    let err = api::products::list(&app.client, 0, 10).await.unwrap_err();
    assert!(matches!(&err, ApiError::SessionExpired));
    assert!(err.requires_reauthentication());

    // The interceptor published the teardown: no token, navigation gated.
    assert!(!app.session.is_authenticated());
    assert_eq!(routes::resolve(&app.session, Route::Stock), Route::SignIn);

    // The persisted session is gone too.
    let restored = app_for(&base_url, &dir);
    assert!(!restored.session.is_authenticated());
}

#[tokio::test]
async fn concurrent_401_responses_tear_down_once_without_inconsistency() {
    let (backend, base_url) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(&base_url, &dir);

    api::auth::sign_in(&app.client, "nadia@gmail.com", "1234")
        .await
        .unwrap();
    backend.revoke_all();

    let (a, b, c) = tokio::join!(
        api::products::list(&app.client, 0, 10),
        api::products::list(&app.client, 1, 10),
        api::products::list(&app.client, 2, 10),
    );
    for result in [a, b, c] {
        assert!(matches!(result, Err(ApiError::SessionExpired)));
    }

    assert!(!app.session.is_authenticated());
    assert!(app.session.token().is_none());
}
