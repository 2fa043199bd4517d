/// Save-search-result flow
use crate::{error::Result, error::ServerError, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use mixtape_core::{Item, MediaDescriptor, NewItem, PlaylistId, PlaylistStore, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    /// Existing target playlist
    #[serde(default)]
    pub playlist_id: Option<String>,
    /// Create this playlist first and save into it
    #[serde(default)]
    pub new_playlist_name: Option<String>,
    /// The search result being saved
    pub media: MediaDescriptor,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub playlist_id: PlaylistId,
    pub item: Item,
}

/// POST /api/users/:user_id/save
/// Save a search result into an existing playlist, or create a new playlist
/// and save into that.
///
/// The two steps are sequential and the creation is never rolled back: when
/// the item turns out to be a duplicate, the new playlist still exists.
pub async fn save_media(
    Path(user_id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>> {
    let user_id = UserId::new(user_id);
    auth.ensure_owner(&user_id)?;

    let target = match (req.playlist_id, req.new_playlist_name) {
        (Some(id), None) => PlaylistId::new(id),
        (None, Some(name)) => {
            app_state
                .store
                .create_playlist(&user_id, &name)
                .await?
                .id
        }
        _ => {
            return Err(ServerError::BadRequest(
                "exactly one of playlist_id and new_playlist_name is required".to_string(),
            ))
        }
    };

    let item = app_state
        .store
        .add_item(&user_id, &target, NewItem::from(req.media))
        .await?;

    Ok(Json(SaveResponse {
        playlist_id: target,
        item,
    }))
}
