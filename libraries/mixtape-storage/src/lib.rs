//! Mixtape Storage
//!
//! Single-document JSON storage layer for Mixtape.
//!
//! The whole deployment state is one denormalized tree (users embedding their
//! playlists and items), held in memory behind a read/write lock and persisted
//! to a single JSON file. Mutations are validated against a working copy that
//! is only committed once it has been durably written, so readers never see a
//! partially-applied change.
//!
//! # Example
//!
//! ```rust,no_run
//! use mixtape_storage::JsonStore;
//! use mixtape_core::PlaylistStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonStore::open("data/library.json").await?;
//! let users = store.list_users().await?;
//! println!("{} users", users.len());
//! # Ok(())
//! # }
//! ```

mod document;
mod error;
mod store;

pub use document::{Library, StoredUser};
pub use error::StorageError;
pub use store::JsonStore;
