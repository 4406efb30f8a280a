use chrono::Utc;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::PostRecord;
use crate::providers::{ProviderError, ProviderOutcome, SourceProvider};

lazy_static! {
    static ref SHORTCODE_RE: Regex =
        Regex::new(r"/(?:p|reels|reel|stories)/([A-Za-z0-9_-]+)").unwrap();
}

/// Extract the shortcode from a post permalink. Bare shortcodes (no slash)
/// are accepted as-is.
pub fn extract_shortcode(target: &str) -> Option<String> {
    if !target.contains('/') {
        return Some(target.to_string());
    }

    SHORTCODE_RE
        .captures(target)
        .map(|caps| caps[1].to_string())
}

/// Retrieves a single post through the internal query endpoint, using a
/// fixed document identifier with the shortcode as its only variable.
pub struct GraphQlScrapeProvider {
    client: Client,
    endpoint: String,
    doc_id: String,
}

impl GraphQlScrapeProvider {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: config.graphql_endpoint.clone(),
            doc_id: config.graphql_doc_id.clone(),
        }
    }

    async fn fetch_one(&self, target: &str) -> Result<PostRecord, ProviderError> {
        let shortcode = extract_shortcode(target)
            .ok_or_else(|| ProviderError::BadUrl(target.to_string()))?;

        let variables = json!({ "shortcode": shortcode }).to_string();

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("doc_id", self.doc_id.as_str()),
                ("variables", variables.as_str()),
            ])
            .header("Accept", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Upstream(format!(
                "HTTP error status: {}",
                status
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        map_shortcode_media(&body, &shortcode)
    }
}

/// Map the nested query response into one post record. Missing display URL
/// or count paths are treated as a malformed response; a missing caption is
/// fine (caption-less posts exist).
pub fn map_shortcode_media(body: &Value, shortcode: &str) -> Result<PostRecord, ProviderError> {
    let media = body
        .get("data")
        .and_then(|v| v.get("xdt_shortcode_media"))
        .ok_or_else(|| {
            ProviderError::MalformedResponse("missing data.xdt_shortcode_media".to_string())
        })?;

    let display_url = media
        .get("display_url")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ProviderError::MalformedResponse("missing display_url".to_string()))?;

    let like_count = media
        .get("edge_media_preview_like")
        .and_then(|v| v.get("count"))
        .and_then(|v| v.as_u64())
        .ok_or_else(|| {
            ProviderError::MalformedResponse("missing edge_media_preview_like.count".to_string())
        })?;

    let comment_count = media
        .get("edge_media_to_parent_comment")
        .and_then(|v| v.get("count"))
        .and_then(|v| v.as_u64())
        .ok_or_else(|| {
            ProviderError::MalformedResponse(
                "missing edge_media_to_parent_comment.count".to_string(),
            )
        })?;

    let caption = media
        .get("edge_media_to_caption")
        .and_then(|v| v.get("edges"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|v| v.get("node"))
        .and_then(|v| v.get("text"))
        .and_then(|v| v.as_str())
        .map(crate::models::truncate_caption);

    Ok(PostRecord {
        id: shortcode.to_string(),
        source_url: PostRecord::permalink(shortcode),
        image_url: display_url.to_string(),
        like_count,
        comment_count,
        caption,
        fetched_at: Utc::now(),
        simulated: false,
    })
}

#[async_trait::async_trait]
impl SourceProvider for GraphQlScrapeProvider {
    fn name(&self) -> &'static str {
        "graphql-scrape"
    }

    async fn fetch(&self, targets: &[String]) -> ProviderOutcome {
        let mut posts = Vec::new();
        let mut last_error = None;

        for target in targets {
            match self.fetch_one(target).await {
                Ok(post) => {
                    info!(
                        "Query endpoint resolved {}: {} likes, {} comments",
                        post.id, post.like_count, post.comment_count
                    );
                    posts.push(post);
                }
                Err(err) => {
                    warn!("Query endpoint failed for {}: {}", target, err);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_shortcode_from_permalinks() {
        for url in [
            "https://www.instagram.com/p/DNDtwCXIcoF/",
            "https://www.instagram.com/reel/DNDtwCXIcoF/?img_index=1",
            "https://www.instagram.com/reels/DNDtwCXIcoF",
            "https://www.instagram.com/stories/DNDtwCXIcoF/",
        ] {
            assert_eq!(
                extract_shortcode(url).as_deref(),
                Some("DNDtwCXIcoF"),
                "{}",
                url
            );
        }
    }

    #[test]
    fn bare_shortcode_passes_through() {
        assert_eq!(extract_shortcode("DNDtwCXIcoF").as_deref(), Some("DNDtwCXIcoF"));
    }

    #[test]
    fn malformed_permalink_is_rejected() {
        assert_eq!(extract_shortcode("https://www.instagram.com/someuser/"), None);
        assert_eq!(extract_shortcode("https://example.com/watch?v=abc"), None);
    }

    fn media_body() -> Value {
        json!({
            "data": {
                "xdt_shortcode_media": {
                    "display_url": "https://cdn.example.com/img.jpg",
                    "edge_media_preview_like": { "count": 120 },
                    "edge_media_to_parent_comment": { "count": 8 },
                    "edge_media_to_caption": {
                        "edges": [ { "node": { "text": "a caption" } } ]
                    }
                }
            }
        })
    }

    #[test]
    fn maps_nested_response_fields() {
        let post = map_shortcode_media(&media_body(), "abc").unwrap();
        assert_eq!(post.id, "abc");
        assert_eq!(post.source_url, "https://www.instagram.com/p/abc/");
        assert_eq!(post.image_url, "https://cdn.example.com/img.jpg");
        assert_eq!(post.like_count, 120);
        assert_eq!(post.comment_count, 8);
        assert_eq!(post.caption.as_deref(), Some("a caption"));
        assert!(!post.simulated);
    }

    #[test]
    fn missing_media_node_is_malformed() {
        let err = map_shortcode_media(&json!({ "data": {} }), "abc").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn missing_counts_are_malformed() {
        let mut body = media_body();
        body["data"]["xdt_shortcode_media"]
            .as_object_mut()
            .unwrap()
            .remove("edge_media_preview_like");
        let err = map_shortcode_media(&body, "abc").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn caption_is_optional() {
        let mut body = media_body();
        body["data"]["xdt_shortcode_media"]
            .as_object_mut()
            .unwrap()
            .remove("edge_media_to_caption");
        let post = map_shortcode_media(&body, "abc").unwrap();
        assert_eq!(post.caption, None);
    }
}
