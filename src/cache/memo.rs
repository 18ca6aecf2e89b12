//! TTL memoization with single-flight deduplication
//!
//! Values are stored as JSON so one map can hold every accessor's result type.
//! Concurrent callers for the same missing key share a single in-flight
//! producer; only successful results are stored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::sync::OnceCell;

use super::Clock;
use crate::error::ApiError;

/// Outcome shared by everyone waiting on one in-flight fetch
type Flight = Arc<OnceCell<Result<Value, ApiError>>>;

/// One memoized accessor result
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Value,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    /// Whether the entry may still be served at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(self.ttl) else {
            return true;
        };
        self.created_at
            .checked_add_signed(ttl)
            .is_none_or(|expires_at| now < expires_at)
    }
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub fresh_entries: usize,
}

/// Process-local memoization cache.
///
/// Owned by the gateway; construct one per gateway so tests start empty.
pub struct MemoCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    in_flight: Mutex<HashMap<String, Flight>>,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoCache {
    /// Create an empty cache reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the fresh value for `key`, or run `fetch` once and remember its result.
    ///
    /// Errors are returned to every caller that joined the flight and are not
    /// stored, so the next call goes upstream again.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(value) = self.lookup(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit: {}", short_key(key));
            return decode(value);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let flight = self.join_flight(key);
        let outcome = flight
            .get_or_init(|| async move {
                // A flight that landed between our lookup and join_flight has already stored it.
                if let Some(value) = self.lookup(key) {
                    return Ok(value);
                }

                debug!("Cache miss, fetching: {}", short_key(key));
                let value = fetch().await.and_then(|v| encode(&v))?;
                self.store(key, value.clone(), ttl);
                Ok(value)
            })
            .await
            .clone();
        self.land_flight(key, &flight);

        decode(outcome?)
    }

    /// Current time as seen by the cache
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Drop every entry and reset counters
    #[allow(dead_code)]
    pub fn clear(&self) {
        self.lock_entries().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Hit/miss counters and entry counts
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.lock_entries();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: entries.len(),
            fresh_entries: entries.values().filter(|e| e.is_fresh(now)).count(),
        }
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        self.lock_entries()
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone())
    }

    fn store(&self, key: &str, value: Value, ttl: Duration) {
        let entry = CacheEntry {
            value,
            created_at: self.clock.now(),
            ttl,
        };
        self.lock_entries().insert(key.to_string(), entry);
    }

    fn join_flight(&self, key: &str) -> Flight {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.entry(key.to_string()).or_default().clone()
    }

    fn land_flight(&self, key: &str, flight: &Flight) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = in_flight.get(key)
            && Arc::ptr_eq(current, flight)
        {
            in_flight.remove(key);
        }
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode cache value: {}", e)))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to decode cache value: {}", e)))
}

fn short_key(key: &str) -> &str {
    key.get(..12).unwrap_or(key)
}
