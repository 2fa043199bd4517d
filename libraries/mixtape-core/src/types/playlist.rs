//! Playlist domain type

use super::{Item, PlaylistId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of saved items, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier, immutable after creation
    pub id: PlaylistId,

    /// Display name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Saved items, in the order they were added
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Playlist {
    /// Create an empty playlist with a fresh id, stamped with the current time
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    /// Look up an item by its provider-side id
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|it| it.id == item_id)
    }
}
