/// Shared application state
use crate::services::{AuthService, FileStorage, SearchProvider};
use mixtape_core::PlaylistStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlaylistStore>,
    pub auth_service: Arc<AuthService>,
    pub file_storage: Arc<FileStorage>,
    pub search: Arc<dyn SearchProvider>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PlaylistStore>,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
        search: Arc<dyn SearchProvider>,
    ) -> Self {
        Self {
            store,
            auth_service,
            file_storage,
            search,
        }
    }
}
