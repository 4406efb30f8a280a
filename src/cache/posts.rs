use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::PostRecord;

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub inserted_at: Instant,
    pub expires_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    pub fn new(data: T, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            data,
            inserted_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }

    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.inserted_at)
    }
}

/// In-memory TTL cache for post batches.
///
/// Expiry is lazy: an expired entry reads as a miss but stays in the map
/// until the next `put` replaces it. Entries are replaced wholesale under
/// the write lock, so concurrent writers cannot leave a partial batch.
pub struct PostCache {
    entries: RwLock<HashMap<String, CacheEntry<Vec<PostRecord>>>>,
    pub cache_duration: Duration,
}

impl PostCache {
    pub fn new(ttl_minutes: u64) -> Self {
        Self::with_ttl(Duration::from_secs(ttl_minutes * 60))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            cache_duration: ttl,
        }
    }

    /// Fresh entry for the key, with its age in seconds. Expired entries
    /// read as a miss.
    pub fn get(&self, key: &str) -> Option<(Vec<PostRecord>, u64)> {
        let entries = self.entries.read();

        if let Some(entry) = entries.get(key) {
            if !entry.is_expired() {
                return Some((entry.data.clone(), entry.age().as_secs()));
            }
        }

        None
    }

    pub fn put(&self, key: &str, posts: Vec<PostRecord>) {
        let mut entries = self.entries.write();
        entries.insert(
            key.to_string(),
            CacheEntry::new(posts, self.cache_duration),
        );
    }

    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write();
        entries.remove(key);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
    }
}
