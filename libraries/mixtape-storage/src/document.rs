//! Persisted document layout
//!
//! The document is a denormalized tree: an ordered sequence of users, each
//! embedding its playlists and their items inline. Stored users additionally
//! carry the bcrypt password hash, which never leaves this crate as part of a
//! [`User`].

use mixtape_core::types::{Playlist, User, UserId};
use serde::{Deserialize, Serialize};

/// Root of the persisted document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    /// All registered users, in registration order
    #[serde(default)]
    pub users: Vec<StoredUser>,
}

/// A user as persisted, credentials included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    /// Unique user identifier
    pub id: UserId,
    /// Unique login name
    pub username: String,
    /// bcrypt hash of the user's password
    pub password_hash: String,
    /// Name shown in the UI
    pub display_name: String,
    /// Avatar image URL
    pub avatar_url: String,
    /// The user's playlists, in creation order
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

impl StoredUser {
    /// The API-facing user shape, without credentials
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
            playlists: self.playlists.clone(),
        }
    }
}

impl Library {
    /// Look up a user by id
    pub fn user(&self, user_id: &UserId) -> Option<&StoredUser> {
        self.users.iter().find(|u| &u.id == user_id)
    }

    /// Look up a user by id, mutably
    pub fn user_mut(&mut self, user_id: &UserId) -> Option<&mut StoredUser> {
        self.users.iter_mut().find(|u| &u.id == user_id)
    }

    /// Look up a user by username
    pub fn user_by_name(&self, username: &str) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.username == username)
    }
}
