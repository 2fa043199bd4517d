//! Pure view logic for the playlist screen
//!
//! These functions derive the entire item-list view (active playlist, filter,
//! sort, first playable entry) from stored state plus request parameters. The
//! server holds no view state between requests, so every call is re-derivable
//! and deep-linking by playlist id works for free.

use crate::types::{Item, ItemKind, Playlist, PlaylistId};
use serde::{Deserialize, Serialize};

/// Sort order for the item-list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Case-insensitive title order
    #[default]
    Alphabetical,
    /// Rating descending
    Rating,
}

/// Inline-playback reference produced by [`first_playable`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableRef {
    /// Provider-side video identifier
    pub media_id: String,
    /// Title of the item
    pub title: String,
    /// When false the client must fall back to an external link
    pub embeddable: bool,
}

/// Pick the active playlist for the view.
///
/// The requested id wins when it exists; otherwise the first playlist in
/// stored order; `None` when the user has no playlists. Idempotent: feeding
/// the result back as `requested` selects the same playlist.
pub fn select_active_playlist(
    playlists: &[Playlist],
    requested: Option<&str>,
) -> Option<PlaylistId> {
    if let Some(id) = requested {
        if let Some(pl) = playlists.iter().find(|pl| pl.id.as_str() == id) {
            return Some(pl.id.clone());
        }
    }
    playlists.first().map(|pl| pl.id.clone())
}

/// Filter items by a case-insensitive title substring and sort them.
///
/// A blank or absent query passes everything. Both sort modes are stable:
/// items that compare equal keep their stored relative order. Pure and
/// deterministic given identical inputs.
pub fn filter_and_sort(items: &[Item], query: Option<&str>, mode: SortMode) -> Vec<Item> {
    let needle = query.map(str::trim).unwrap_or_default().to_lowercase();

    let mut view: Vec<Item> = items
        .iter()
        .filter(|it| needle.is_empty() || it.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match mode {
        SortMode::Alphabetical => {
            view.sort_by_key(|it| it.title.to_lowercase());
        }
        SortMode::Rating => {
            view.sort_by(|a, b| b.rating.cmp(&a.rating));
        }
    }

    view
}

/// Scan the playlist in stored order for the first media item.
///
/// Non-embeddable media is still returned, flagged so the client renders an
/// external link instead of an inline player. Uploaded audio files are not
/// inline-playable through this path and are skipped.
pub fn first_playable(playlist: &Playlist) -> Option<PlayableRef> {
    playlist
        .items
        .iter()
        .find(|it| it.kind == ItemKind::Media)
        .map(|it| PlayableRef {
            media_id: it.id.clone(),
            title: it.title.clone(),
            embeddable: it.embeddable,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn playlist(id: &str) -> Playlist {
        Playlist {
            id: PlaylistId::new(id),
            name: format!("Playlist {id}"),
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    fn item(id: &str, kind: ItemKind, title: &str, rating: u8) -> Item {
        Item {
            id: id.into(),
            kind,
            title: title.into(),
            thumbnail: None,
            duration_seconds: None,
            view_count: None,
            embeddable: true,
            rating,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn select_active_with_no_playlists() {
        assert_eq!(select_active_playlist(&[], Some("x")), None);
        assert_eq!(select_active_playlist(&[], None), None);
    }

    #[test]
    fn select_active_prefers_requested_id() {
        let playlists = vec![playlist("a"), playlist("b")];
        let active = select_active_playlist(&playlists, Some("b")).unwrap();
        assert_eq!(active.as_str(), "b");
    }

    #[test]
    fn select_active_falls_back_to_first() {
        let playlists = vec![playlist("a"), playlist("b")];
        let active = select_active_playlist(&playlists, Some("missing")).unwrap();
        assert_eq!(active.as_str(), "a");

        let active = select_active_playlist(&playlists, None).unwrap();
        assert_eq!(active.as_str(), "a");
    }

    #[test]
    fn selection_is_idempotent() {
        let playlists = vec![playlist("a"), playlist("b")];
        let first = select_active_playlist(&playlists, Some("b")).unwrap();
        let second = select_active_playlist(&playlists, Some(first.as_str())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn filter_matches_case_insensitive_substring() {
        let items = vec![
            item("1", ItemKind::Media, "Hello Adele", 0),
            item("2", ItemKind::Media, "Something Else", 0),
            item("3", ItemKind::AudioFile, "adele live.mp3", 0),
        ];
        let view = filter_and_sort(&items, Some("ADELE"), SortMode::Alphabetical);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn blank_query_passes_all_items() {
        let items = vec![
            item("1", ItemKind::Media, "B", 0),
            item("2", ItemKind::Media, "A", 0),
        ];
        assert_eq!(filter_and_sort(&items, None, SortMode::Rating).len(), 2);
        assert_eq!(filter_and_sort(&items, Some("  "), SortMode::Rating).len(), 2);
    }

    #[test]
    fn rating_sort_is_stable() {
        let items = vec![
            item("1", ItemKind::Media, "B", 3),
            item("2", ItemKind::Media, "A", 3),
            item("3", ItemKind::Media, "C", 5),
        ];
        let view = filter_and_sort(&items, None, SortMode::Rating);
        let titles: Vec<&str> = view.iter().map(|it| it.title.as_str()).collect();
        // Equal ratings keep original relative order: B before A
        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[test]
    fn alphabetical_sort_ignores_case() {
        let items = vec![
            item("1", ItemKind::Media, "banana", 0),
            item("2", ItemKind::Media, "Apple", 0),
            item("3", ItemKind::Media, "cherry", 0),
        ];
        let view = filter_and_sort(&items, None, SortMode::Alphabetical);
        let titles: Vec<&str> = view.iter().map(|it| it.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn filter_and_sort_is_deterministic() {
        let items = vec![
            item("1", ItemKind::Media, "B", 3),
            item("2", ItemKind::Media, "A", 3),
        ];
        let first = filter_and_sort(&items, Some("a"), SortMode::Rating);
        let second = filter_and_sort(&items, Some("a"), SortMode::Rating);
        assert_eq!(first, second);
    }

    #[test]
    fn first_playable_skips_audio_files() {
        let mut pl = playlist("a");
        pl.items = vec![
            item("f1", ItemKind::AudioFile, "mix.mp3", 0),
            item("v1", ItemKind::Media, "Video", 0),
        ];
        let playable = first_playable(&pl).unwrap();
        assert_eq!(playable.media_id, "v1");
        assert!(playable.embeddable);
    }

    #[test]
    fn first_playable_flags_non_embeddable() {
        let mut pl = playlist("a");
        let mut blocked = item("v1", ItemKind::Media, "Video", 0);
        blocked.embeddable = false;
        pl.items = vec![blocked];

        // Non-embeddable media is returned, not skipped
        let playable = first_playable(&pl).unwrap();
        assert!(!playable.embeddable);
    }

    #[test]
    fn first_playable_on_empty_playlist() {
        let mut pl = playlist("a");
        pl.items = vec![item("f1", ItemKind::AudioFile, "mix.mp3", 0)];
        assert_eq!(first_playable(&pl), None);
        pl.items.clear();
        assert_eq!(first_playable(&pl), None);
    }
}
