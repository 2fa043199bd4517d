/// Common test utilities and fixtures
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use mixtape_core::MediaDescriptor;
use mixtape_server::{
    services::{AuthService, FileStorage, SearchProvider},
    state::AppState,
    ServerError,
};
use mixtape_storage::JsonStore;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Canned search provider so tests never touch the network
pub struct CannedSearch;

#[async_trait]
impl SearchProvider for CannedSearch {
    async fn search(&self, query: &str) -> mixtape_server::Result<Vec<MediaDescriptor>> {
        if query == "outage" {
            return Err(ServerError::Upstream("provider down".to_string()));
        }
        Ok(vec![
            MediaDescriptor {
                id: "v1".to_string(),
                title: format!("{query} - result one"),
                thumbnail: "https://img.example/v1.jpg".to_string(),
                duration_seconds: 295,
                view_count: 1_000_000,
                embeddable: true,
            },
            MediaDescriptor {
                id: "v2".to_string(),
                title: format!("{query} - result two"),
                thumbnail: "https://img.example/v2.jpg".to_string(),
                duration_seconds: 188,
                view_count: 50_000,
                embeddable: false,
            },
        ])
    }
}

/// A fully wired test application over an in-memory store
pub struct TestApp {
    pub app: Router,
    pub uploads_dir: TempDir,
}

pub async fn create_test_app() -> TestApp {
    let store = Arc::new(JsonStore::in_memory());

    let uploads_dir = TempDir::new().expect("Failed to create temp dir");
    let file_storage = FileStorage::new(uploads_dir.path().to_path_buf());
    file_storage
        .initialize()
        .await
        .expect("Failed to initialize file storage");

    let auth_service = Arc::new(AuthService::new(
        "test-secret-key".to_string(),
        1, // 1 hour access
        1, // 1 day refresh
    ));

    let app_state = AppState::new(
        store,
        auth_service,
        Arc::new(file_storage),
        Arc::new(CannedSearch),
    );

    TestApp {
        app: mixtape_server::create_router(app_state),
        uploads_dir,
    }
}

/// Parse a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}

/// Build a JSON request, optionally authenticated
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Build a bodyless request, optionally authenticated
pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Register a user and return (user id, access token, favorites playlist id)
pub async fn register_user(app: &Router, username: &str) -> (String, String, String) {
    let body = serde_json::json!({
        "username": username,
        "password": "Password123!",
        "display_name": username,
        "avatar_url": "https://avatars.example/default.png",
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/register", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let json = body_json(response).await;
    let user_id = json["user"]["id"].as_str().unwrap().to_string();
    let token = json["access_token"].as_str().unwrap().to_string();
    let favorites = json["user"]["playlists"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    (user_id, token, favorites)
}

/// A media item payload for the add-item endpoint
pub fn media_item_body(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "kind": "media",
        "title": title,
        "thumbnail": format!("https://img.example/{id}.jpg"),
        "duration_seconds": 240,
        "view_count": 12345,
        "embeddable": true,
    })
}
