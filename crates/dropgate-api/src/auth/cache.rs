//! Shared TTL cache for authorization outcomes.

use dropgate_core::models::AuthorizationOutcome;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Time-bounded cache keyed by hashed (selector, credential) pairs.
///
/// Expiry is passive: entries are checked on read and dropped when stale;
/// nothing sweeps the map in the background. Concurrent writes to the same
/// key are last-write-wins, and concurrent misses may each trigger their own
/// upstream call since the cache does no request coalescing.
#[derive(Clone)]
pub struct AuthCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

struct CacheEntry {
    outcome: AuthorizationOutcome,
    inserted_at: Instant,
}

impl AuthCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<AuthorizationOutcome> {
        let mut guard = self.entries.lock().await;
        match guard.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.outcome.clone()),
            Some(_) => {
                guard.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn put(&self, key: String, outcome: AuthorizationOutcome) {
        let mut guard = self.entries.lock().await;
        guard.insert(
            key,
            CacheEntry {
                outcome,
                inserted_at: Instant::now(),
            },
        );
    }
}
