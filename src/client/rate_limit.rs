//! Per-upstream rate limiting
//!
//! Reactive: a limiter only throttles after its upstream has answered with a
//! rate-limit response. Until then requests go out unthrottled. Once active,
//! requests wait out the back-off upstream asked for and are then spaced
//! evenly across the category's quota.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

/// Upstream API families with separate quotas.
///
/// - GitHub REST: 5000 requests/hour for an authenticated token
/// - GitHub GraphQL: 5000 points/hour, one point per simple query
/// - Vercel REST: roughly 100 list requests/minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointCategory {
    GitHubRest,
    GitHubGraphQl,
    Vercel,
}

impl EndpointCategory {
    /// All categories for initialization.
    pub const ALL: [EndpointCategory; 3] = [
        EndpointCategory::GitHubRest,
        EndpointCategory::GitHubGraphQl,
        EndpointCategory::Vercel,
    ];

    /// Quota applied once the limiter is active.
    ///
    /// Burst is one so an active limiter spaces requests out instead of
    /// releasing the whole hourly allowance at once.
    pub fn quota(&self) -> Quota {
        let quota = match self {
            EndpointCategory::GitHubRest | EndpointCategory::GitHubGraphQl => {
                Quota::per_hour(NonZeroU32::new(5000).unwrap_or(NonZeroU32::MIN))
            }
            EndpointCategory::Vercel => {
                Quota::per_minute(NonZeroU32::new(100).unwrap_or(NonZeroU32::MIN))
            }
        };
        quota.allow_burst(NonZeroU32::MIN)
    }
}

/// Whether a response tells us to slow down.
///
/// GitHub signals an exhausted primary quota with 403 and
/// `x-ratelimit-remaining: 0`; secondary limits and Vercel use 429.
pub fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    status == StatusCode::FORBIDDEN
        && headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0")
}

/// Rate limiter state for a single category.
pub struct EndpointRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    active: AtomicBool,
    /// No request goes out before this point
    resume_at: Mutex<Option<Instant>>,
    category: EndpointCategory,
}

impl EndpointRateLimiter {
    pub fn new(category: EndpointCategory) -> Self {
        Self {
            limiter: RateLimiter::direct(category.quota()),
            active: AtomicBool::new(false),
            resume_at: Mutex::new(None),
            category,
        }
    }

    /// Activate rate limiting for this category and hold requests back for
    /// `backoff`. A later activation only ever extends the hold.
    pub async fn activate(&self, backoff: Duration) {
        let was_active = self.active.swap(true, Ordering::SeqCst);
        if !was_active {
            debug!("Rate limiting activated for {:?}", self.category);
        }

        let until = Instant::now() + backoff;
        let mut resume_at = self.resume_at.lock().await;
        if resume_at.is_none_or(|current| current < until) {
            debug!("Holding {:?} requests for {:?}", self.category, backoff);
            *resume_at = Some(until);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for permission if rate limiting is active.
    pub async fn wait_if_active(&self) {
        if !self.is_active() {
            return;
        }

        let resume_at = *self.resume_at.lock().await;
        if let Some(until) = resume_at {
            tokio::time::sleep_until(until).await;
        }
        debug!("Waiting for rate limiter {:?}", self.category);
        self.limiter.until_ready().await;
    }
}

/// Rate limiters for every category, shared by the clients of one process.
pub struct RateLimiterSet {
    limiters: RwLock<HashMap<EndpointCategory, EndpointRateLimiter>>,
}

impl Default for RateLimiterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterSet {
    pub fn new() -> Self {
        let map = EndpointCategory::ALL
            .into_iter()
            .map(|category| (category, EndpointRateLimiter::new(category)))
            .collect();

        Self {
            limiters: RwLock::new(map),
        }
    }

    /// Wait for rate limit permission for a category (if active).
    pub async fn wait_for(&self, category: EndpointCategory) {
        let limiters = self.limiters.read().await;
        if let Some(limiter) = limiters.get(&category) {
            limiter.wait_if_active().await;
        }
    }

    /// Activate rate limiting for a category, backing off for `backoff`.
    pub async fn activate(&self, category: EndpointCategory, backoff: Duration) {
        let limiters = self.limiters.read().await;
        if let Some(limiter) = limiters.get(&category) {
            limiter.activate(backoff).await;
        }
    }

    /// Whether a category is currently throttled.
    pub async fn is_active(&self, category: EndpointCategory) -> bool {
        let limiters = self.limiters.read().await;
        limiters.get(&category).is_some_and(|l| l.is_active())
    }
}
