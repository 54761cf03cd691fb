//! Bounded get-or-compute memoization cache.
//!
//! The live trends APIs are rate-limited and a daily series costs one
//! request per day of range, so fetch results are memoized per search term.
//! The cache is an explicit value handed to its users, bounded in size and
//! age; population for the same key is idempotent, so concurrent misses on
//! one key may race without harm.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// In-memory memoization cache with a capacity bound and per-entry TTL.
pub struct MemoCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries, each valid for
    /// `ttl` after insertion.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Look up a live entry, evicting it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        let expired = match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
        }
        None
    }

    /// Insert a value, evicting expired entries first and then the oldest
    /// entry if the capacity bound would be exceeded.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let now = Instant::now();

        entries.retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);

        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    /// Number of entries currently held, live or not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached value for `key`, computing and storing it on a
    /// miss. The lock is never held across the computation, so concurrent
    /// misses may compute in parallel; whichever insert lands last wins,
    /// which is harmless because values for a key are identical.
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: K,
        compute: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        if let Some(hit) = self.get(&key) {
            tracing::debug!("memo cache hit");
            return Ok(hit);
        }

        tracing::debug!("memo cache miss, computing");
        let value = compute().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_second_lookup_does_not_recompute() {
        let cache: MemoCache<String, u32> = MemoCache::new(8, Duration::from_secs(60));
        let computations = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<u32, Infallible> = cache
                .get_or_try_insert_with("term".to_string(), || async {
                    computations.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                })
                .await;
            assert_eq!(value.unwrap(), 42);
        }

        assert_eq!(computations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_computation_is_not_cached() {
        let cache: MemoCache<String, u32> = MemoCache::new(8, Duration::from_secs(60));

        let first: Result<u32, &str> = cache
            .get_or_try_insert_with("term".to_string(), || async { Err("boom") })
            .await;
        assert!(first.is_err());

        let second: Result<u32, &str> = cache
            .get_or_try_insert_with("term".to_string(), || async { Ok(7) })
            .await;
        assert_eq!(second.unwrap(), 7);
    }

    #[test]
    fn test_expired_entries_are_evicted_on_access() {
        let cache: MemoCache<&str, u32> = MemoCache::new(8, Duration::from_millis(10));
        cache.insert("term", 1);

        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.get(&"term"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_bound_evicts_oldest() {
        let cache: MemoCache<u32, u32> = MemoCache::new(2, Duration::from_secs(60));

        cache.insert(1, 10);
        std::thread::sleep(Duration::from_millis(2));
        cache.insert(2, 20);
        std::thread::sleep(Duration::from_millis(2));
        cache.insert(3, 30);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(20));
        assert_eq!(cache.get(&3), Some(30));
    }

    #[test]
    fn test_reinserting_existing_key_does_not_evict_others() {
        let cache: MemoCache<u32, u32> = MemoCache::new(2, Duration::from_secs(60));

        cache.insert(1, 10);
        cache.insert(2, 20);
        cache.insert(2, 21);

        assert_eq!(cache.get(&1), Some(10));
        assert_eq!(cache.get(&2), Some(21));
    }
}
