mod posts;

pub use posts::{CacheEntry, PostCache};

/// Service-wide key for the cached post batch.
pub const POSTS_CACHE_KEY: &str = "instagram_posts";
