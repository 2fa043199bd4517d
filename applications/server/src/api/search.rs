/// Media search API routes
use crate::{error::Result, error::ServerError, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use mixtape_core::MediaDescriptor;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/search?q=
/// Proxy a query to the external media search provider
pub async fn search(
    Query(query): Query<SearchQuery>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<MediaDescriptor>>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(ServerError::BadRequest("missing query".to_string()));
    }

    let results = app_state.search.search(q).await?;
    Ok(Json(results))
}
