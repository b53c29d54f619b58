// Tab cache
// Bounded, short-TTL memoization for dashboard reads. Entries expire
// after a fixed duration; inserting past capacity evicts the entries
// with the nearest expiry first. Mutating commands invalidate the keys
// they affect, and a background interval overwrites the active snapshot
// regardless of cache state.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

struct CacheEntry {
    value: Value,
    expires_at: i64,
}

pub struct TabCache {
    ttl_millis: i64,
    capacity: usize,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl TabCache {
    pub fn new(ttl_millis: i64, capacity: usize) -> Self {
        Self {
            ttl_millis,
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str, now: i64) -> Option<Value> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        if now < entry.expires_at {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn set(&self, key: &str, value: Value, now: i64) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: now + self.ttl_millis,
            },
        );
        while entries.len() > self.capacity {
            let Some(nearest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            entries.remove(&nearest);
        }
    }

    pub fn invalidate(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }

    /// Drops every key starting with the prefix; mutation hooks use this
    /// to flush all filter variants of a view at once.
    pub fn invalidate_prefix(&self, prefix: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|key, _| !key.starts_with(prefix));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_after_set_until_expiry() {
        let cache = TabCache::new(1_000, 8);
        cache.set("dashboard", json!({"users": 3}), 0);
        assert_eq!(cache.get("dashboard", 999), Some(json!({"users": 3})));
        assert_eq!(cache.get("dashboard", 1_000), None);
    }

    #[test]
    fn overflow_evicts_nearest_expiry_first() {
        let cache = TabCache::new(1_000, 2);
        cache.set("a", json!(1), 0);
        cache.set("b", json!(2), 100);
        cache.set("c", json!(3), 200);
        assert_eq!(cache.get("a", 300), None);
        assert_eq!(cache.get("b", 300), Some(json!(2)));
        assert_eq!(cache.get("c", 300), Some(json!(3)));
    }

    #[test]
    fn invalidate_removes_immediately() {
        let cache = TabCache::new(1_000, 8);
        cache.set("dashboard", json!(1), 0);
        cache.invalidate("dashboard");
        assert_eq!(cache.get("dashboard", 1), None);
    }

    #[test]
    fn prefix_invalidation_spares_other_views() {
        let cache = TabCache::new(1_000, 8);
        cache.set("dashboard:0:0", json!(1), 0);
        cache.set("dashboard:10:20", json!(2), 0);
        cache.set("loans", json!(3), 0);
        cache.invalidate_prefix("dashboard");
        assert_eq!(cache.get("dashboard:0:0", 1), None);
        assert_eq!(cache.get("dashboard:10:20", 1), None);
        assert_eq!(cache.get("loans", 1), Some(json!(3)));
    }

    #[test]
    fn set_overwrites_silently() {
        let cache = TabCache::new(1_000, 8);
        cache.set("dashboard", json!(1), 0);
        cache.set("dashboard", json!(2), 500);
        assert_eq!(cache.get("dashboard", 1_400), Some(json!(2)));
    }
}
