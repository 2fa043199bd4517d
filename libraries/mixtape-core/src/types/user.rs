//! User domain type

use super::{Playlist, UserId};
use serde::{Deserialize, Serialize};

/// User account with its embedded playlists
///
/// This is the API-facing shape; credentials live with the storage layer and
/// are never serialized here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier, the sole foreign key used by other entities
    pub id: UserId,

    /// Unique login name
    pub username: String,

    /// Name shown in the UI
    pub display_name: String,

    /// Avatar image URL
    pub avatar_url: String,

    /// The user's playlists, in creation order
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

impl User {
    /// Look up one of the user's playlists by id
    pub fn playlist(&self, playlist_id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|pl| pl.id.as_str() == playlist_id)
    }
}

/// Payload for registering a new user
///
/// The password arrives here already hashed; the storage layer never sees
/// plaintext credentials.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique login name
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Name shown in the UI
    pub display_name: String,
    /// Avatar image URL
    pub avatar_url: String,
}
