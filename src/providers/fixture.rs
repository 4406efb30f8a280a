use chrono::Utc;
use lazy_static::lazy_static;

use crate::config::{AppConfig, FallbackPost};
use crate::models::PostRecord;
use crate::providers::metrics;
use crate::providers::{ProviderOutcome, SourceProvider};

lazy_static! {
    // Built-in fallback entries used when configuration supplies none.
    static ref DEFAULT_FALLBACK: Vec<FallbackPost> = vec![FallbackPost {
        id: "DNDtwCXIcoF".to_string(),
        image_url: None,
        caption: Some("Latest from our feed".to_string()),
    }];
}

/// Terminal fallback: a fixed, configuration-supplied post list with zero
/// counts. Never fails and never returns an empty batch, so the chain
/// always has something to hand back.
pub struct StaticProvider {
    posts: Vec<PostRecord>,
}

impl StaticProvider {
    pub fn new(config: &AppConfig) -> Self {
        let entries = match &config.fallback_posts {
            Some(entries) if !entries.is_empty() => entries.clone(),
            _ => DEFAULT_FALLBACK.clone(),
        };

        let posts = entries
            .iter()
            .map(|entry| PostRecord {
                id: entry.id.clone(),
                source_url: PostRecord::permalink(&entry.id),
                image_url: entry
                    .image_url
                    .clone()
                    .unwrap_or_else(|| metrics::placeholder_image_url(&entry.id)),
                like_count: 0,
                comment_count: 0,
                caption: entry.caption.as_deref().map(crate::models::truncate_caption),
                fetched_at: Utc::now(),
                simulated: true,
            })
            .collect();

        Self { posts }
    }

    pub fn posts(&self) -> Vec<PostRecord> {
        self.posts.clone()
    }
}

#[async_trait::async_trait]
impl SourceProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self, _targets: &[String]) -> ProviderOutcome {
        ProviderOutcome::Success(self.posts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use rocket::figment::Figment;

    fn empty_config() -> AppConfig {
        Figment::new().extract().unwrap()
    }

    #[test]
    fn defaults_are_used_without_configuration() {
        let provider = StaticProvider::new(&empty_config());
        let posts = provider.posts();
        assert!(!posts.is_empty());
        assert!(posts.iter().all(|p| p.like_count == 0 && p.comment_count == 0));
        assert!(posts.iter().all(|p| !p.image_url.is_empty()));
    }

    #[test]
    fn configured_entries_take_precedence() {
        let mut config = empty_config();
        config.fallback_posts = Some(vec![FallbackPost {
            id: "abc".to_string(),
            image_url: Some("https://example.com/abc.jpg".to_string()),
            caption: None,
        }]);

        let posts = StaticProvider::new(&config).posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "abc");
        assert_eq!(posts[0].image_url, "https://example.com/abc.jpg");
        assert!(posts[0].simulated);
    }
}
