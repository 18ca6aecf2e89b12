//! Normalized GitHub and Vercel data models
//!
//! Upstream JSON is parsed into these types at the client boundary. Every
//! field that upstream may omit or null carries a serde default, so a shape
//! mismatch surfaces as one parse error instead of scattered optional checks.

mod event;
mod insight;
mod manifest;
mod org;
mod release;
mod repo;
mod user;
mod vercel;

pub use event::{Event, EventPayload, EventPullRequest, EventRepo};
pub use insight::{
    AlertSeverityCounts, DependabotAlert, RouterUsage, SecurityAdvisory, TrafficDay,
    TrafficSummary, TrafficViews,
};
pub use manifest::PackageManifest;
pub use org::Organization;
pub use release::{Release, clean_version_tag};
pub use repo::{RepoOwner, Repository};
pub use user::{SocialAccount, User};
pub use vercel::{VercelLink, VercelProject, VercelProjectList};
