//! Mixtape Core
//!
//! Domain types, error handling, and the storage contract for Mixtape.
//!
//! This crate defines:
//! - **Domain Types**: `User`, `Playlist`, `Item`, `MediaDescriptor`
//! - **Storage Contract**: the [`PlaylistStore`] trait implemented by storage backends
//! - **View Logic**: pure functions deriving the playlist view from stored state
//! - **Error Handling**: unified [`MixtapeError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use mixtape_core::types::Playlist;
//! use mixtape_core::view::{filter_and_sort, SortMode};
//!
//! let playlist = Playlist::new("Road Trip");
//! let view = filter_and_sort(&playlist.items, Some("adele"), SortMode::Rating);
//! assert!(view.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use error::{MixtapeError, Result};
pub use store::{Credentials, PlaylistStore};
pub use types::{
    Item, ItemKind, MediaDescriptor, NewItem, NewUser, Playlist, PlaylistId, User, UserId,
};
pub use view::{filter_and_sort, first_playable, select_active_playlist, PlayableRef, SortMode};
