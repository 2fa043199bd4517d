//! Storage contract for the playlist tree

use crate::error::Result;
use crate::types::{Item, NewItem, NewUser, Playlist, PlaylistId, User, UserId};
use async_trait::async_trait;

/// Login credentials resolved from a username
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Owning user id
    pub user_id: UserId,
    /// bcrypt hash of the user's password
    pub password_hash: String,
}

/// Durable CRUD over the User → Playlist → Item hierarchy, scoped by user id.
///
/// Implementations must make every mutation atomic with respect to concurrent
/// calls: a failed operation leaves no partial state visible, and two
/// concurrent [`add_item`](PlaylistStore::add_item) calls for the same
/// `(kind, id)` under one user resolve to exactly one success and one
/// `Conflict`.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user account, seeding its default playlist.
    ///
    /// # Errors
    /// `Conflict` when the username is already taken, `InvalidInput` when a
    /// required field is blank.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Get a user with all playlists and items
    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// Get all users
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Resolve login credentials by username
    async fn credentials(&self, username: &str) -> Result<Option<Credentials>>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Get the user's playlists in stored order.
    ///
    /// # Errors
    /// `NotFound` for an unknown user.
    async fn list_playlists(&self, user_id: &UserId) -> Result<Vec<Playlist>>;

    /// Create an empty playlist with a generated id.
    ///
    /// # Errors
    /// `InvalidInput` for a blank name, `NotFound` for an unknown user.
    async fn create_playlist(&self, user_id: &UserId, name: &str) -> Result<Playlist>;

    /// Delete a playlist and all of its items atomically.
    ///
    /// # Errors
    /// `NotFound` for an unknown user or playlist.
    async fn delete_playlist(&self, user_id: &UserId, playlist_id: &PlaylistId) -> Result<()>;

    // ========================================================================
    // Items
    // ========================================================================

    /// Save an item into a playlist.
    ///
    /// The duplicate check spans ALL of the user's playlists: a `(kind, id)`
    /// reference saved anywhere yields `Conflict`. On success `added_at` is
    /// stamped and an absent rating normalizes to 0.
    ///
    /// # Errors
    /// `InvalidInput` for a missing id/kind or out-of-range rating,
    /// `NotFound` for an unknown user or playlist, `Conflict` on duplicates.
    async fn add_item(
        &self,
        user_id: &UserId,
        playlist_id: &PlaylistId,
        item: NewItem,
    ) -> Result<Item>;

    /// Set an item's star rating.
    ///
    /// # Errors
    /// `InvalidInput` when the rating is outside 0..=5 (rejected, never
    /// clamped), `NotFound` for an unknown user, playlist, or item.
    async fn update_item_rating(
        &self,
        user_id: &UserId,
        playlist_id: &PlaylistId,
        item_id: &str,
        rating: i64,
    ) -> Result<Item>;

    /// Remove an item from a playlist.
    ///
    /// # Errors
    /// `NotFound` for an unknown user, playlist, or item.
    async fn delete_item(
        &self,
        user_id: &UserId,
        playlist_id: &PlaylistId,
        item_id: &str,
    ) -> Result<()>;
}
