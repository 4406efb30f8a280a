use chrono::Utc;
use log::{error, info};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::PostRecord;
use crate::providers::metrics;
use crate::providers::{ProviderError, ProviderOutcome, SourceProvider};

/// Media kinds accepted from the media-listing endpoint.
const MEDIA_KIND_ALLOW_LIST: [&str; 3] = ["IMAGE", "VIDEO", "CAROUSEL_ALBUM"];

/// Number of items kept from the listing, in upstream order.
const MAX_ITEMS: usize = 6;

const MEDIA_FIELDS: &str =
    "id,media_type,media_url,thumbnail_url,permalink,caption,timestamp,like_count,comments_count";

/// Retrieves the account's recent media through the credentialed
/// media-listing endpoint. Without an access token the provider fails
/// immediately so the chain can move on without paying a network call.
pub struct GraphProvider {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl GraphProvider {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: config.graph_media_endpoint.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

/// Map a media-listing response body into post records.
///
/// Items outside the media-kind allow-list are dropped, video items prefer
/// their thumbnail over the raw media URL, and items missing engagement
/// counts get deterministic simulated ones.
pub fn map_media_listing(json: &Value) -> Vec<PostRecord> {
    let Some(items) = json.get("data").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    let now = Utc::now();
    let mut posts = Vec::new();

    for item in items {
        let Some(id) = item.get("id").and_then(|v| v.as_str()) else {
            continue;
        };

        let media_type = item
            .get("media_type")
            .and_then(|v| v.as_str())
            .unwrap_or("IMAGE");

        if !MEDIA_KIND_ALLOW_LIST.contains(&media_type) {
            continue;
        }

        // Videos render better from their thumbnail than from the raw
        // media URL.
        let image_url = if media_type == "VIDEO" {
            item.get("thumbnail_url")
                .or_else(|| item.get("media_url"))
                .and_then(|v| v.as_str())
        } else {
            item.get("media_url")
                .or_else(|| item.get("thumbnail_url"))
                .and_then(|v| v.as_str())
        }
        .map(str::to_string)
        .unwrap_or_else(|| metrics::placeholder_image_url(id));

        let source_url = item
            .get("permalink")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| PostRecord::permalink(id));

        let caption = item
            .get("caption")
            .and_then(|v| v.as_str())
            .map(crate::models::truncate_caption);

        let like_count = item.get("like_count").and_then(|v| v.as_u64());
        let comment_count = item.get("comments_count").and_then(|v| v.as_u64());

        let (like_count, comment_count, simulated) = match (like_count, comment_count) {
            (Some(likes), Some(comments)) => (likes, comments, false),
            _ => (
                metrics::simulated_like_count(id),
                metrics::simulated_comment_count(id),
                true,
            ),
        };

        posts.push(PostRecord {
            id: id.to_string(),
            source_url,
            image_url,
            like_count,
            comment_count,
            caption,
            fetched_at: now,
            simulated,
        });

        if posts.len() == MAX_ITEMS {
            break;
        }
    }

    posts
}

#[async_trait::async_trait]
impl SourceProvider for GraphProvider {
    fn name(&self) -> &'static str {
        "graph"
    }

    async fn fetch(&self, _targets: &[String]) -> ProviderOutcome {
        let Some(token) = &self.access_token else {
            return ProviderOutcome::Failure(ProviderError::Unconfigured(
                "no access token".to_string(),
            ));
        };

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("fields", MEDIA_FIELDS), ("access_token", token)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return ProviderOutcome::Failure(err.into()),
        };

        let status = response.status();
        if !status.is_success() {
            error!("Media listing request failed with status: {}", status);
            return ProviderOutcome::Failure(ProviderError::Upstream(format!(
                "HTTP error status: {}",
                status
            )));
        }

        let json = match response.json::<Value>().await {
            Ok(json) => json,
            Err(err) => {
                return ProviderOutcome::Failure(ProviderError::MalformedResponse(
                    err.to_string(),
                ))
            }
        };

        let posts = map_media_listing(&json);

        if posts.is_empty() {
            ProviderOutcome::Empty
        } else {
            info!("Media listing returned {} posts", posts.len());
            ProviderOutcome::Success(posts)
        }
    }
}
