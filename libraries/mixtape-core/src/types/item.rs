//! Saved item and search result types

use crate::error::{MixtapeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest allowed star rating
pub const MAX_RATING: u8 = 5;

/// What a saved item points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// External streaming video, playable inline when embeddable
    Media,
    /// Uploaded audio file served from our own blob storage
    AudioFile,
}

/// An item saved into a playlist
///
/// Identity for deduplication purposes is `(kind, id)`: the same media
/// reference may exist in at most one playlist per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Provider-side identifier (video id or uploaded file id)
    pub id: String,

    /// Media or uploaded audio file
    pub kind: ItemKind,

    /// Display title
    pub title: String,

    /// Thumbnail URL, if the provider supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Duration in seconds (media only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,

    /// View count at save time (media only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,

    /// Whether inline playback is permitted (media only)
    #[serde(default = "default_embeddable")]
    pub embeddable: bool,

    /// Star rating, always 0..=5
    #[serde(default)]
    pub rating: u8,

    /// When the item was saved
    pub added_at: DateTime<Utc>,
}

impl Item {
    /// Deduplication key: the same `(kind, id)` may exist in at most one
    /// playlist per user
    pub fn key(&self) -> (ItemKind, &str) {
        (self.kind, &self.id)
    }
}

fn default_embeddable() -> bool {
    true
}

/// Payload for saving a new item into a playlist
///
/// `id` and `kind` are optional at the wire level so that their absence can be
/// rejected as invalid input rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    /// Provider-side identifier; required
    #[serde(default)]
    pub id: String,

    /// Media or uploaded audio file; required
    #[serde(default)]
    pub kind: Option<ItemKind>,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Duration in seconds (media only)
    #[serde(default)]
    pub duration_seconds: Option<u64>,

    /// View count (media only)
    #[serde(default)]
    pub view_count: Option<u64>,

    /// Whether inline playback is permitted
    #[serde(default = "default_embeddable")]
    pub embeddable: bool,

    /// Requested star rating; absent normalizes to 0
    #[serde(default)]
    pub rating: Option<i64>,
}

impl NewItem {
    /// Validate the payload and build a stored [`Item`] stamped with `added_at`.
    ///
    /// # Errors
    /// Returns `InvalidInput` when id or kind is missing, or the rating is
    /// outside 0..=5.
    pub fn into_item(self, added_at: DateTime<Utc>) -> Result<Item> {
        if self.id.trim().is_empty() {
            return Err(MixtapeError::invalid_input("item id is required"));
        }
        let kind = self
            .kind
            .ok_or_else(|| MixtapeError::invalid_input("item kind is required"))?;
        let rating = match self.rating {
            Some(r) => validate_rating(r)?,
            None => 0,
        };

        Ok(Item {
            id: self.id,
            kind,
            title: self.title,
            thumbnail: self.thumbnail,
            duration_seconds: self.duration_seconds,
            view_count: self.view_count,
            embeddable: self.embeddable,
            rating,
            added_at,
        })
    }
}

/// Check that a requested rating is an integer in 0..=5.
///
/// Out-of-range values are rejected, never clamped.
pub fn validate_rating(rating: i64) -> Result<u8> {
    match u8::try_from(rating) {
        Ok(r) if r <= MAX_RATING => Ok(r),
        _ => Err(MixtapeError::invalid_input(format!(
            "rating must be between 0 and {MAX_RATING}, got {rating}"
        ))),
    }
}

/// Search result record returned by the external media search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Provider-side video identifier
    pub id: String,
    /// Video title
    pub title: String,
    /// Thumbnail URL
    pub thumbnail: String,
    /// Duration in seconds
    pub duration_seconds: u64,
    /// View count
    pub view_count: u64,
    /// Whether the provider permits inline playback
    pub embeddable: bool,
}

impl From<MediaDescriptor> for NewItem {
    fn from(media: MediaDescriptor) -> Self {
        NewItem {
            id: media.id,
            kind: Some(ItemKind::Media),
            title: media.title,
            thumbnail: Some(media.thumbnail),
            duration_seconds: Some(media.duration_seconds),
            view_count: Some(media.view_count),
            embeddable: media.embeddable,
            rating: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_range_is_enforced() {
        assert!(validate_rating(-1).is_err());
        assert!(validate_rating(6).is_err());
        for r in 0..=5 {
            assert_eq!(validate_rating(r).unwrap(), u8::try_from(r).unwrap());
        }
    }

    #[test]
    fn new_item_requires_id_and_kind() {
        let missing_id = NewItem {
            id: String::new(),
            kind: Some(ItemKind::Media),
            title: "Song".into(),
            thumbnail: None,
            duration_seconds: None,
            view_count: None,
            embeddable: true,
            rating: None,
        };
        assert!(missing_id.into_item(Utc::now()).is_err());

        let missing_kind = NewItem {
            id: "v1".into(),
            kind: None,
            title: "Song".into(),
            thumbnail: None,
            duration_seconds: None,
            view_count: None,
            embeddable: true,
            rating: None,
        };
        assert!(missing_kind.into_item(Utc::now()).is_err());
    }

    #[test]
    fn absent_rating_normalizes_to_zero() {
        let item = NewItem {
            id: "v1".into(),
            kind: Some(ItemKind::Media),
            title: "Song".into(),
            thumbnail: None,
            duration_seconds: Some(180),
            view_count: Some(42),
            embeddable: true,
            rating: None,
        }
        .into_item(Utc::now())
        .unwrap();
        assert_eq!(item.rating, 0);
    }

    #[test]
    fn media_descriptor_converts_to_media_item() {
        let media = MediaDescriptor {
            id: "v1".into(),
            title: "Hello".into(),
            thumbnail: "https://img.example/v1.jpg".into(),
            duration_seconds: 295,
            view_count: 1_000_000,
            embeddable: false,
        };
        let new_item = NewItem::from(media);
        assert_eq!(new_item.kind, Some(ItemKind::Media));
        assert!(!new_item.embeddable);
    }
}
