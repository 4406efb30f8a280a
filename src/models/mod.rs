use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum caption length kept for display.
pub const CAPTION_DISPLAY_LIMIT: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: String,
    pub source_url: String,
    pub image_url: String,
    pub like_count: u64,
    pub comment_count: u64,
    pub caption: Option<String>,
    pub fetched_at: DateTime<Utc>,
    /// True when the engagement counts were derived locally instead of
    /// observed upstream.
    pub simulated: bool,
}

impl PostRecord {
    /// Canonical permalink for a post shortcode.
    pub fn permalink(shortcode: &str) -> String {
        format!("https://www.instagram.com/p/{}/", shortcode)
    }
}

/// Truncate a caption to the display limit without splitting a character.
pub fn truncate_caption(caption: &str) -> String {
    if caption.chars().count() <= CAPTION_DISPLAY_LIMIT {
        return caption.to_string();
    }

    caption.chars().take(CAPTION_DISPLAY_LIMIT).collect()
}

// Response wrappers for the API, including cache info
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub success: bool,
    pub data: Vec<PostRecord>,
    pub cached: bool,
    pub cache_age: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: String,
}
