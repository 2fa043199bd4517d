/// Media search service - proxy to the external video search provider
use crate::error::{Result, ServerError};
use async_trait::async_trait;
use mixtape_core::MediaDescriptor;
use serde::Deserialize;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

/// Black-box media search: a query in, media descriptors out.
///
/// The production implementation talks to the YouTube Data API; tests swap in
/// a canned provider.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<MediaDescriptor>>;
}

/// YouTube Data API v3 client
pub struct YouTubeSearch {
    client: reqwest::Client,
    api_key: String,
    max_results: u32,
}

impl YouTubeSearch {
    pub fn new(api_key: String, max_results: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            max_results,
        }
    }

    async fn video_ids(&self, query: &str) -> Result<Vec<String>> {
        let max_results = self.max_results.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("q", query),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ServerError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServerError::Upstream(format!(
                "search request failed: {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ServerError::Upstream(e.to_string()))?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect())
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<MediaDescriptor>> {
        let ids = ids.join(",");
        let response = self
            .client
            .get(VIDEOS_URL)
            .query(&[
                ("part", "contentDetails,statistics,snippet,status"),
                ("id", ids.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ServerError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServerError::Upstream(format!(
                "details request failed: {}",
                response.status()
            )));
        }

        let body: VideosResponse = response
            .json()
            .await
            .map_err(|e| ServerError::Upstream(e.to_string()))?;

        Ok(body.items.into_iter().map(Video::into_descriptor).collect())
    }
}

#[async_trait]
impl SearchProvider for YouTubeSearch {
    async fn search(&self, query: &str) -> Result<Vec<MediaDescriptor>> {
        if self.api_key.is_empty() {
            return Err(ServerError::Upstream(
                "search provider not configured (set MIXTAPE_SEARCH_YOUTUBE_API_KEY)".to_string(),
            ));
        }

        // Two-phase lookup: the search endpoint only returns ids and
        // snippets, duration/views/embeddability need the videos endpoint
        let ids = self.video_ids(query).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.video_details(&ids).await
    }
}

/// Seconds from an ISO-8601 duration of the `PT#H#M#S` form.
///
/// Unknown designators are ignored, matching the provider's video durations
/// which never exceed hours.
pub fn parse_iso8601_duration(value: &str) -> u64 {
    let Some(rest) = value.strip_prefix("PT") else {
        return 0;
    };

    let mut total = 0u64;
    let mut number = 0u64;
    for c in rest.chars() {
        if let Some(digit) = c.to_digit(10) {
            number = number * 10 + u64::from(digit);
        } else {
            match c {
                'H' => total += number * 3600,
                'M' => total += number * 60,
                'S' => total += number,
                _ => {}
            }
            number = 0;
        }
    }
    total
}

// Wire types for the provider's responses

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    id: String,
    snippet: Option<Snippet>,
    #[serde(rename = "contentDetails")]
    content_details: Option<ContentDetails>,
    statistics: Option<Statistics>,
    status: Option<VideoStatus>,
}

impl Video {
    fn into_descriptor(self) -> MediaDescriptor {
        let snippet = self.snippet.unwrap_or_default();
        MediaDescriptor {
            id: self.id,
            title: snippet.title,
            thumbnail: snippet
                .thumbnails
                .medium
                .map(|t| t.url)
                .unwrap_or_default(),
            duration_seconds: self
                .content_details
                .map(|d| parse_iso8601_duration(&d.duration))
                .unwrap_or_default(),
            view_count: self
                .statistics
                .and_then(|s| s.view_count)
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            embeddable: self.status.and_then(|s| s.embeddable).unwrap_or(true),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoStatus {
    embeddable: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parsing() {
        assert_eq!(parse_iso8601_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_iso8601_duration("PT4M5S"), 245);
        assert_eq!(parse_iso8601_duration("PT45S"), 45);
        assert_eq!(parse_iso8601_duration("PT0S"), 0);
        assert_eq!(parse_iso8601_duration("garbage"), 0);
    }

    #[test]
    fn video_maps_to_descriptor() {
        let video: Video = serde_json::from_value(serde_json::json!({
            "id": "v1",
            "snippet": {
                "title": "Hello",
                "thumbnails": { "medium": { "url": "https://img.example/v1.jpg" } }
            },
            "contentDetails": { "duration": "PT4M55S" },
            "statistics": { "viewCount": "123456" },
            "status": { "embeddable": false }
        }))
        .unwrap();

        let descriptor = video.into_descriptor();
        assert_eq!(descriptor.id, "v1");
        assert_eq!(descriptor.duration_seconds, 295);
        assert_eq!(descriptor.view_count, 123_456);
        assert!(!descriptor.embeddable);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let video: Video = serde_json::from_value(serde_json::json!({ "id": "v2" })).unwrap();
        let descriptor = video.into_descriptor();
        assert_eq!(descriptor.view_count, 0);
        assert!(descriptor.embeddable, "embeddable defaults to true");
    }
}
