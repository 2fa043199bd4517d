/// Audio upload API routes
use crate::{error::Result, error::ServerError, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use mixtape_core::ItemKind;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: String,
    pub url: String,
    pub title: String,
    pub kind: ItemKind,
}

/// POST /api/upload
/// Store an uploaded audio file and return its blob reference, ready to be
/// saved into a playlist as an `audio_file` item.
pub async fn upload(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<UploadResponse>> {
    // Parse multipart form
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .ok_or_else(|| ServerError::BadRequest("Missing boundary".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut title: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                file_name = Some(field.file_name().unwrap_or("upload.mp3").to_string());
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            ServerError::BadRequest(format!("Failed to read file: {}", e))
                        })?
                        .to_vec(),
                );
            }
            "title" => {
                title = Some(field.text().await.map_err(|e| {
                    ServerError::BadRequest(format!("Failed to read title: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let data = file_data.ok_or_else(|| ServerError::BadRequest("No file uploaded".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "upload.mp3".to_string());

    let stored = app_state.file_storage.store_upload(&file_name, &data).await?;

    let title = title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| file_name.clone());

    tracing::info!(id = %stored.id, "audio file uploaded");

    Ok(Json(UploadResponse {
        id: stored.id,
        url: stored.url,
        title,
        kind: ItemKind::AudioFile,
    }))
}
