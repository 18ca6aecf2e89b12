//! In-memory memoization for upstream API responses
//!
//! Every gateway accessor goes through [`MemoCache::get_or_fetch`] with a TTL
//! tier from [`CacheTtl`]. Entries live in process memory only.

pub mod clock;
pub mod key;
pub mod memo;

use std::time::Duration;

/// Cache TTL configuration per accessor
///
/// Tiers trade freshness against GitHub/Vercel rate limits.
pub struct CacheTtl;

impl CacheTtl {
    // Profile data changes rarely but is the page headline
    pub const USER: Duration = Duration::from_secs(60); // 1 min

    // Public events move fast
    pub const ACTIVITY: Duration = Duration::from_secs(5 * 60); // 5 min

    // Repository data
    pub const REPOS: Duration = Duration::from_secs(60 * 60); // 1 hr
    pub const PACKAGE_MANIFEST: Duration = Duration::from_secs(60 * 60); // 1 hr
    pub const LATEST_RELEASE: Duration = Duration::from_secs(60 * 60); // 1 hr
    pub const TRAFFIC: Duration = Duration::from_secs(60 * 60); // 1 hr

    // Slow-moving account data
    pub const SOCIAL_ACCOUNTS: Duration = Duration::from_secs(12 * 60 * 60); // 12 hr
    pub const PINNED_REPOS: Duration = Duration::from_secs(12 * 60 * 60); // 12 hr
    pub const ORGANIZATIONS: Duration = Duration::from_secs(12 * 60 * 60); // 12 hr
    pub const VERCEL_PROJECTS: Duration = Duration::from_secs(12 * 60 * 60); // 12 hr
    pub const DEPENDABOT_ALERTS: Duration = Duration::from_secs(12 * 60 * 60); // 12 hr
    pub const COPILOT_PRS: Duration = Duration::from_secs(12 * 60 * 60); // 12 hr

    // Repository layout almost never changes
    pub const ROUTER_LAYOUT: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr
}

// Re-export main types
pub use clock::{Clock, SystemClock};
pub use key::cache_key;
pub use memo::{CacheStats, MemoCache};
