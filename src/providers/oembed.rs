use chrono::Utc;
use log::{info, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::PostRecord;
use crate::providers::metrics;
use crate::providers::{ProviderError, ProviderOutcome, SourceProvider};

/// Retrieves posts through the public oEmbed endpoint.
///
/// oEmbed resolves a thumbnail for public posts but carries no engagement
/// data, so counts are always simulated here. A target that fails is
/// skipped rather than failing the whole batch.
pub struct OEmbedProvider {
    client: Client,
    endpoint: String,
}

impl OEmbedProvider {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: config.oembed_endpoint.clone(),
        }
    }

    async fn fetch_one(&self, post_id: &str) -> Result<PostRecord, ProviderError> {
        let permalink = PostRecord::permalink(post_id);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", permalink.as_str())])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Upstream(format!(
                "HTTP error status: {}",
                status
            )));
        }

        let json = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        let image_url = json
            .get("thumbnail_url")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| metrics::placeholder_image_url(post_id));

        let caption = json
            .get("title")
            .and_then(|v| v.as_str())
            .map(crate::models::truncate_caption);

        Ok(PostRecord {
            id: post_id.to_string(),
            source_url: permalink,
            image_url,
            like_count: metrics::simulated_like_count(post_id),
            comment_count: metrics::simulated_comment_count(post_id),
            caption,
            fetched_at: Utc::now(),
            simulated: true,
        })
    }
}

#[async_trait::async_trait]
impl SourceProvider for OEmbedProvider {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn fetch(&self, targets: &[String]) -> ProviderOutcome {
        let mut posts = Vec::new();
        let mut last_error = None;

        for post_id in targets {
            match self.fetch_one(post_id).await {
                Ok(post) => {
                    info!(
                        "oEmbed resolved post {}: {} likes, {} comments (simulated)",
                        post_id, post.like_count, post.comment_count
                    );
                    posts.push(post);
                }
                Err(err) => {
                    warn!("oEmbed failed for post {}: {}", post_id, err);
                    last_error = Some(err);
                }
            }
        }

        if !posts.is_empty() {
            ProviderOutcome::Success(posts)
        } else if let Some(err) = last_error {
            ProviderOutcome::Failure(err)
        } else {
            ProviderOutcome::Empty
        }
    }
}
