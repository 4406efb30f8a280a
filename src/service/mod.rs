use log::info;
use parking_lot::RwLock;

use crate::cache::{PostCache, POSTS_CACHE_KEY};
use crate::models::PostRecord;
use crate::providers::FallbackChain;

/// Orchestrates the cache and the provider chain.
///
/// Reads go cache-first; a miss (or a forced refresh) runs the chain and
/// replaces the cached batch wholesale under the fixed service-wide key.
/// The cache write only happens once the chain has produced a complete
/// batch, so an abandoned fetch never commits a partial entry.
pub struct InstagramService {
    chain: FallbackChain,
    cache: PostCache,
    targets: RwLock<Vec<String>>,
}

impl InstagramService {
    pub fn new(chain: FallbackChain, cache: PostCache, targets: Vec<String>) -> Self {
        Self {
            chain,
            cache,
            targets: RwLock::new(targets),
        }
    }

    /// Returns the post batch plus whether it came from the cache and, if
    /// so, how old it is in seconds.
    pub async fn get_posts(&self, force_refresh: bool) -> (Vec<PostRecord>, bool, Option<u64>) {
        if !force_refresh {
            if let Some((posts, age)) = self.cache.get(POSTS_CACHE_KEY) {
                return (posts, true, Some(age));
            }
        }

        let targets = self.targets.read().clone();
        let posts = self.chain.fetch(&targets).await;
        self.cache.put(POSTS_CACHE_KEY, posts.clone());

        (posts, false, None)
    }

    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache.cache_duration.as_secs()
    }

    pub fn clear_cache(&self) {
        info!("Clearing post cache");
        self.cache.clear();
    }

    /// Track an additional post id; returns false if it was already known.
    /// The next refresh picks it up.
    pub fn track_post(&self, post_id: &str) -> bool {
        let mut targets = self.targets.write();
        if targets.iter().any(|t| t == post_id) {
            return false;
        }
        targets.push(post_id.to_string());
        true
    }
}
