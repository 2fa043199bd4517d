//! JSON-document implementation of the [`PlaylistStore`] contract

use crate::document::{Library, StoredUser};
use crate::error::StorageError;
use async_trait::async_trait;
use chrono::Utc;
use mixtape_core::error::{MixtapeError, Result};
use mixtape_core::store::{Credentials, PlaylistStore};
use mixtape_core::types::{
    validate_rating, Item, NewItem, NewUser, Playlist, PlaylistId, User, UserId,
};
use std::io;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;

/// Name of the playlist seeded at registration
pub const DEFAULT_PLAYLIST_NAME: &str = "Favorites";

/// Single-file JSON document store.
///
/// All mutations serialize on the document's write lock: the operation runs
/// against a working copy which is persisted (temp file + rename) before being
/// committed in memory, so a failed validation or a failed write leaves
/// nothing behind. Readers share the read lock and always observe a
/// self-consistent snapshot.
pub struct JsonStore {
    path: Option<PathBuf>,
    library: RwLock<Library>,
}

impl JsonStore {
    /// Open a store backed by the given file, creating parent directories.
    /// A missing file starts an empty library.
    pub async fn open(path: impl Into<PathBuf>) -> std::result::Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let library = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Load(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Library::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), users = library.users.len(), "library loaded");

        Ok(Self {
            path: Some(path),
            library: RwLock::new(library),
        })
    }

    /// Store with no backing file, for tests
    pub fn in_memory() -> Self {
        Self {
            path: None,
            library: RwLock::new(Library::default()),
        }
    }

    /// Run a mutation against a working copy of the document.
    ///
    /// The copy is committed only after it has been durably written; on any
    /// error the in-memory document is untouched.
    async fn mutate<T>(&self, op: impl FnOnce(&mut Library) -> Result<T> + Send) -> Result<T> {
        let mut guard = self.library.write().await;
        let mut working = guard.clone();
        let out = op(&mut working)?;
        self.persist(&working).await?;
        *guard = working;
        Ok(out)
    }

    /// Write the document to disk, all-or-nothing (temp file + rename)
    async fn persist(&self, library: &Library) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_vec_pretty(library)
            .map_err(|e| MixtapeError::from(StorageError::Serialization(e)))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|e| MixtapeError::from(StorageError::Persist(e.to_string())))?;
        fs::rename(&tmp, path)
            .await
            .map_err(|e| MixtapeError::from(StorageError::Persist(e.to_string())))?;

        Ok(())
    }
}

fn user_not_found(user_id: &UserId) -> MixtapeError {
    MixtapeError::not_found("user", user_id.as_str())
}

fn playlist_not_found(playlist_id: &PlaylistId) -> MixtapeError {
    MixtapeError::not_found("playlist", playlist_id.as_str())
}

#[async_trait]
impl PlaylistStore for JsonStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.mutate(move |library| {
            for (field, value) in [
                ("username", &new_user.username),
                ("password", &new_user.password_hash),
                ("display_name", &new_user.display_name),
                ("avatar_url", &new_user.avatar_url),
            ] {
                if value.trim().is_empty() {
                    return Err(MixtapeError::invalid_input(format!("{field} is required")));
                }
            }

            if library.user_by_name(&new_user.username).is_some() {
                return Err(MixtapeError::conflict(format!(
                    "username already exists: {}",
                    new_user.username
                )));
            }

            let stored = StoredUser {
                id: UserId::generate(),
                username: new_user.username,
                password_hash: new_user.password_hash,
                display_name: new_user.display_name,
                avatar_url: new_user.avatar_url,
                playlists: vec![Playlist::new(DEFAULT_PLAYLIST_NAME)],
            };
            let user = stored.to_user();
            library.users.push(stored);

            tracing::info!(user_id = %user.id, username = %user.username, "user created");
            Ok(user)
        })
        .await
    }

    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>> {
        let library = self.library.read().await;
        Ok(library.user(user_id).map(StoredUser::to_user))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let library = self.library.read().await;
        Ok(library.users.iter().map(StoredUser::to_user).collect())
    }

    async fn credentials(&self, username: &str) -> Result<Option<Credentials>> {
        let library = self.library.read().await;
        Ok(library.user_by_name(username).map(|u| Credentials {
            user_id: u.id.clone(),
            password_hash: u.password_hash.clone(),
        }))
    }

    async fn list_playlists(&self, user_id: &UserId) -> Result<Vec<Playlist>> {
        let library = self.library.read().await;
        let user = library.user(user_id).ok_or_else(|| user_not_found(user_id))?;
        Ok(user.playlists.clone())
    }

    async fn create_playlist(&self, user_id: &UserId, name: &str) -> Result<Playlist> {
        let name = name.trim().to_string();
        let user_id = user_id.clone();
        self.mutate(move |library| {
            if name.is_empty() {
                return Err(MixtapeError::invalid_input("playlist name is required"));
            }
            let user = library
                .user_mut(&user_id)
                .ok_or_else(|| user_not_found(&user_id))?;

            let playlist = Playlist::new(name);
            user.playlists.push(playlist.clone());
            Ok(playlist)
        })
        .await
    }

    async fn delete_playlist(&self, user_id: &UserId, playlist_id: &PlaylistId) -> Result<()> {
        let user_id = user_id.clone();
        let playlist_id = playlist_id.clone();
        self.mutate(move |library| {
            let user = library
                .user_mut(&user_id)
                .ok_or_else(|| user_not_found(&user_id))?;

            let pos = user
                .playlists
                .iter()
                .position(|pl| pl.id == playlist_id)
                .ok_or_else(|| playlist_not_found(&playlist_id))?;

            // Removing the playlist drops its items with it; no orphans
            user.playlists.remove(pos);
            Ok(())
        })
        .await
    }

    async fn add_item(
        &self,
        user_id: &UserId,
        playlist_id: &PlaylistId,
        item: NewItem,
    ) -> Result<Item> {
        let user_id = user_id.clone();
        let playlist_id = playlist_id.clone();
        self.mutate(move |library| {
            let user = library
                .user_mut(&user_id)
                .ok_or_else(|| user_not_found(&user_id))?;

            if !user.playlists.iter().any(|pl| pl.id == playlist_id) {
                return Err(playlist_not_found(&playlist_id));
            }

            let item = item.into_item(Utc::now())?;

            // The duplicate scan spans every playlist of the user, not just
            // the target: a media reference lives in at most one playlist.
            let duplicate = user
                .playlists
                .iter()
                .flat_map(|pl| pl.items.iter())
                .any(|existing| existing.key() == item.key());
            if duplicate {
                return Err(MixtapeError::conflict(format!(
                    "item already saved in a playlist: {}",
                    item.id
                )));
            }

            let playlist = user
                .playlists
                .iter_mut()
                .find(|pl| pl.id == playlist_id)
                .ok_or_else(|| playlist_not_found(&playlist_id))?;
            playlist.items.push(item.clone());
            Ok(item)
        })
        .await
    }

    async fn update_item_rating(
        &self,
        user_id: &UserId,
        playlist_id: &PlaylistId,
        item_id: &str,
        rating: i64,
    ) -> Result<Item> {
        let user_id = user_id.clone();
        let playlist_id = playlist_id.clone();
        let item_id = item_id.to_string();
        self.mutate(move |library| {
            let rating = validate_rating(rating)?;

            let user = library
                .user_mut(&user_id)
                .ok_or_else(|| user_not_found(&user_id))?;
            let playlist = user
                .playlists
                .iter_mut()
                .find(|pl| pl.id == playlist_id)
                .ok_or_else(|| playlist_not_found(&playlist_id))?;
            let item = playlist
                .items
                .iter_mut()
                .find(|it| it.id == item_id)
                .ok_or_else(|| MixtapeError::not_found("item", &item_id))?;

            item.rating = rating;
            Ok(item.clone())
        })
        .await
    }

    async fn delete_item(
        &self,
        user_id: &UserId,
        playlist_id: &PlaylistId,
        item_id: &str,
    ) -> Result<()> {
        let user_id = user_id.clone();
        let playlist_id = playlist_id.clone();
        let item_id = item_id.to_string();
        self.mutate(move |library| {
            let user = library
                .user_mut(&user_id)
                .ok_or_else(|| user_not_found(&user_id))?;
            let playlist = user
                .playlists
                .iter_mut()
                .find(|pl| pl.id == playlist_id)
                .ok_or_else(|| playlist_not_found(&playlist_id))?;

            let pos = playlist
                .items
                .iter()
                .position(|it| it.id == item_id)
                .ok_or_else(|| MixtapeError::not_found("item", &item_id))?;

            playlist.items.remove(pos);
            Ok(())
        })
        .await
    }
}
