/// Playlists API routes
use crate::{error::Result, error::ServerError, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use mixtape_core::{
    filter_and_sort, first_playable, select_active_playlist, Item, NewItem, Playlist, PlayableRef,
    PlaylistId, PlaylistStore, SortMode, UserId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Requested active playlist id (deep link); falls back to the first
    #[serde(default)]
    pub active: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<Playlist>,
    pub active_playlist_id: Option<PlaylistId>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    pub playlist: Playlist,
}

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    /// Case-insensitive title filter
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: SortMode,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub playlist_id: PlaylistId,
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub item: Item,
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: i64,
}

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub playable: PlayableRef,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// GET /api/users/:user_id/playlists
/// List playlists and resolve the active one for the view
pub async fn list_playlists(
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<PlaylistsResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    let playlists = app_state.store.list_playlists(&user_id).await?;
    let active_playlist_id = select_active_playlist(&playlists, query.active.as_deref());

    Ok(Json(PlaylistsResponse {
        playlists,
        active_playlist_id,
    }))
}

/// POST /api/users/:user_id/playlists
/// Create a new playlist
pub async fn create_playlist(
    Path(user_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Json<PlaylistResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    let playlist = app_state.store.create_playlist(&user_id, &req.name).await?;
    Ok(Json(PlaylistResponse { playlist }))
}

/// DELETE /api/users/:user_id/playlists/:playlist_id
/// Delete a playlist and all of its items
pub async fn delete_playlist(
    Path((user_id, playlist_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<OkResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    app_state
        .store
        .delete_playlist(&user_id, &PlaylistId::new(playlist_id))
        .await?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /api/users/:user_id/playlists/:playlist_id/items
/// Filtered, sorted view of one playlist's items
pub async fn list_items(
    Path((user_id, playlist_id)): Path<(String, String)>,
    Query(query): Query<ItemsQuery>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<ItemsResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    let playlist = find_playlist(&app_state, &user_id, &playlist_id).await?;
    let items = filter_and_sort(&playlist.items, query.q.as_deref(), query.sort);

    Ok(Json(ItemsResponse {
        playlist_id: playlist.id,
        items,
    }))
}

/// POST /api/users/:user_id/playlists/:playlist_id/items
/// Save an item into a playlist
pub async fn add_item(
    Path((user_id, playlist_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<NewItem>,
) -> Result<Json<ItemResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    let item = app_state
        .store
        .add_item(&user_id, &PlaylistId::new(playlist_id), req)
        .await?;
    Ok(Json(ItemResponse { item }))
}

/// PATCH /api/users/:user_id/playlists/:playlist_id/items/:item_id
/// Update an item's star rating
pub async fn update_rating(
    Path((user_id, playlist_id, item_id)): Path<(String, String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<RatingRequest>,
) -> Result<Json<ItemResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    let item = app_state
        .store
        .update_item_rating(&user_id, &PlaylistId::new(playlist_id), &item_id, req.rating)
        .await?;
    Ok(Json(ItemResponse { item }))
}

/// DELETE /api/users/:user_id/playlists/:playlist_id/items/:item_id
/// Remove an item from a playlist
pub async fn delete_item(
    Path((user_id, playlist_id, item_id)): Path<(String, String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<OkResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    app_state
        .store
        .delete_item(&user_id, &PlaylistId::new(playlist_id), &item_id)
        .await?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /api/users/:user_id/playlists/:playlist_id/play
/// First playable media item of the playlist, in stored order
pub async fn play(
    Path((user_id, playlist_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<PlayResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    let playlist = find_playlist(&app_state, &user_id, &playlist_id).await?;
    let playable = first_playable(&playlist).ok_or_else(|| {
        ServerError::NotFound("no playable media in playlist".to_string())
    })?;

    Ok(Json(PlayResponse { playable }))
}

/// Resolve one playlist out of the user's stored list
async fn find_playlist(
    app_state: &AppState,
    user_id: &UserId,
    playlist_id: &str,
) -> Result<Playlist> {
    let playlists = app_state.store.list_playlists(user_id).await?;
    playlists
        .into_iter()
        .find(|pl| pl.id.as_str() == playlist_id)
        .ok_or_else(|| ServerError::NotFound(format!("playlist not found: {playlist_id}")))
}
