/// API route modules
pub mod auth;
pub mod health;
pub mod playlists;
pub mod save;
pub mod search;
pub mod upload;

use crate::state::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router.
///
/// Public routes are auth + health; everything scoped by `/users/:user_id`
/// plus search and upload sits behind the bearer-token middleware. Uploaded
/// audio is served statically under `/uploads`.
pub fn create_router(state: AppState) -> Router {
    let auth_service = Arc::clone(&state.auth_service);
    let uploads_dir = state.file_storage.base_path().to_path_buf();

    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh));

    let protected_routes = Router::new()
        // Playlists
        .route(
            "/users/:user_id/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route(
            "/users/:user_id/playlists/:playlist_id",
            delete(playlists::delete_playlist),
        )
        .route(
            "/users/:user_id/playlists/:playlist_id/play",
            get(playlists::play),
        )
        // Items
        .route(
            "/users/:user_id/playlists/:playlist_id/items",
            get(playlists::list_items).post(playlists::add_item),
        )
        .route(
            "/users/:user_id/playlists/:playlist_id/items/:item_id",
            patch(playlists::update_rating).delete(playlists::delete_item),
        )
        // Save a search result, optionally into a brand-new playlist
        .route("/users/:user_id/save", post(save::save_media))
        // External collaborators
        .route("/search", get(search::search))
        .route("/upload", post(upload::upload))
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            crate::middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
