//! Mixtape Server Library
//!
//! Media-bookmarking server: account registration, external video search,
//! MP3 uploads, and per-user playlists with star ratings.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{
    auth::AuthService, file_storage::FileStorage, search::SearchProvider, search::YouTubeSearch,
};
pub use state::AppState;
