/// File storage service - keeps uploaded audio files on disk
use crate::error::{Result, ServerError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Blob-store reference returned after a successful upload
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    /// Stable file id, also the on-disk name
    pub id: String,
    /// Public URL path the file is served under
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Create the uploads directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Store an uploaded audio file under a collision-free name.
    ///
    /// Only audio content is accepted; the original name survives in the
    /// stored name for readability but the uuid prefix is what makes the id
    /// stable and unique.
    pub async fn store_upload(&self, original_name: &str, data: &[u8]) -> Result<StoredFile> {
        if data.is_empty() {
            return Err(ServerError::BadRequest("uploaded file is empty".to_string()));
        }

        let mime = mime_guess::from_path(original_name).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::AUDIO {
            return Err(ServerError::BadRequest(format!(
                "not an audio file: {original_name}"
            )));
        }

        let filename = format!("{}-{}", Uuid::new_v4(), sanitize(original_name));
        let path = self.base_path.join(&filename);

        fs::write(&path, data).await?;
        tracing::debug!(file = %path.display(), bytes = data.len(), "upload stored");

        Ok(StoredFile {
            id: filename.clone(),
            url: format!("/uploads/{filename}"),
        })
    }
}

/// Collapse whitespace and path separators out of a client-supplied name
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect()
}
