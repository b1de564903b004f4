//! Memoized search results keyed by normalized query.
//!
//! Entries expire after the configured TTL and the store evicts in LRU order
//! once capacity is reached. Time is read from `tokio::time::Instant`, so
//! paused-clock tests can step over the TTL.

use std::sync::RwLock;

use lru::LruCache;
use metrics::counter;
use tokio::time::Instant;

use crate::domain::posts::Post;
use crate::util::lock::{rw_read, rw_write};

use super::config::CacheConfig;

const SOURCE: &str = "cache::store";

struct Entry {
    posts: Vec<Post>,
    stored_at: Instant,
}

pub struct QueryCache {
    config: CacheConfig,
    entries: RwLock<LruCache<String, Entry>>,
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            config: config.clone(),
            entries: RwLock::new(LruCache::new(config.capacity_non_zero())),
        }
    }

    /// Fetch a fresh entry. Expired entries are dropped and count as misses.
    pub fn get(&self, key: &str) -> Option<Vec<Post>> {
        let mut entries = rw_write(&self.entries, SOURCE, "get");

        let fresh = entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.config.ttl)
            .map(|entry| entry.posts.clone());

        if fresh.is_some() {
            counter!("blog_search_cache_hit_total").increment(1);
        } else {
            entries.pop(key);
            counter!("blog_search_cache_miss_total").increment(1);
        }
        fresh
    }

    pub fn put(&self, key: String, posts: Vec<Post>) {
        let mut entries = rw_write(&self.entries, SOURCE, "put");
        let entry = Entry {
            posts,
            stored_at: Instant::now(),
        };

        if let Some((evicted, _)) = entries.push(key.clone(), entry) {
            if evicted != key {
                counter!("blog_search_cache_evict_total").increment(1);
            }
        }
    }

    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        rw_write(&self.entries, SOURCE, "clear").clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::posts::POSTS;

    fn config(capacity: usize, ttl_secs: u64) -> CacheConfig {
        CacheConfig {
            enabled: true,
            capacity,
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_entries_are_returned() {
        let cache = QueryCache::new(&config(4, 60));
        cache.put("saas".to_string(), POSTS[..2].to_vec());

        let hit = cache.get("saas").expect("cached entry");
        assert_eq!(hit.len(), 2);
        assert!(cache.get("design").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_miss_and_are_dropped() {
        let cache = QueryCache::new(&config(4, 60));
        cache.put("saas".to_string(), POSTS[..2].to_vec());

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(cache.get("saas").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn least_recently_used_entry_is_evicted() {
        let cache = QueryCache::new(&config(2, 60));
        cache.put("a".to_string(), Vec::new());
        cache.put("b".to_string(), Vec::new());
        assert!(cache.get("a").is_some());

        cache.put("c".to_string(), Vec::new());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_a_key_does_not_grow_the_store() {
        let cache = QueryCache::new(&config(2, 60));
        cache.put("a".to_string(), Vec::new());
        cache.put("a".to_string(), POSTS[..1].to_vec());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").map(|posts| posts.len()), Some(1));

        cache.clear();
        assert!(cache.is_empty());
    }
}
