//! Test helpers and fixtures for storage integration tests
//!
//! Stores are backed by REAL files in a scratch directory (not purely
//! in-memory) so persistence and reopen behavior is exercised the same way
//! production uses it.

use mixtape_core::types::{ItemKind, NewItem, NewUser, UserId};
use mixtape_core::PlaylistStore;
use mixtape_storage::JsonStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test store wrapper that cleans up its scratch directory on drop
pub struct TestStore {
    pub store: JsonStore,
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TestStore {
    /// Create a new file-backed store in a scratch directory
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("library.json");
        let store = JsonStore::open(&path).await.expect("Failed to open store");
        Self {
            store,
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Path of the backing document, for reopen tests
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Test fixture: register a user and return its id
pub async fn create_test_user(store: &JsonStore, username: &str) -> UserId {
    store
        .create_user(NewUser {
            username: username.to_string(),
            password_hash: "$2b$12$test-hash".to_string(),
            display_name: username.to_string(),
            avatar_url: "https://avatars.example/default.png".to_string(),
        })
        .await
        .expect("Failed to create test user")
        .id
}

/// Test fixture: a media item payload
pub fn media_item(id: &str, title: &str) -> NewItem {
    NewItem {
        id: id.to_string(),
        kind: Some(ItemKind::Media),
        title: title.to_string(),
        thumbnail: Some(format!("https://img.example/{id}.jpg")),
        duration_seconds: Some(240),
        view_count: Some(12_345),
        embeddable: true,
        rating: None,
    }
}

/// Test fixture: an uploaded audio file payload
pub fn audio_item(id: &str, title: &str) -> NewItem {
    NewItem {
        id: id.to_string(),
        kind: Some(ItemKind::AudioFile),
        title: title.to_string(),
        thumbnail: None,
        duration_seconds: None,
        view_count: None,
        embeddable: true,
        rating: None,
    }
}
