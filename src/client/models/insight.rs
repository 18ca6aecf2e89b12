//! Per-repository insight models: traffic, Dependabot alerts, router layout

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw traffic response (`GET /repos/{owner}/{repo}/traffic/views`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficViews {
    #[serde(default)]
    pub count: u64,

    /// Unique visitors over the whole window
    #[serde(default)]
    pub uniques: u64,

    #[serde(default)]
    pub views: Vec<TrafficDay>,
}

/// One day of traffic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficDay {
    /// ISO-8601 timestamp at the start of the day
    #[serde(default)]
    pub timestamp: String,

    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub uniques: u64,
}

impl TrafficViews {
    /// Reduce to the numbers shown next to a repository
    pub fn summarize(&self, today: NaiveDate) -> TrafficSummary {
        let prefix = today.format("%Y-%m-%d").to_string();
        let today_uniques = self
            .views
            .iter()
            .find(|day| day.timestamp.starts_with(&prefix))
            .map(|day| day.uniques)
            .unwrap_or(0);

        TrafficSummary {
            accessible: true,
            sum_uniques: self.uniques,
            today_uniques,
        }
    }
}

/// Visitor counts for a repository.
///
/// `accessible` is false when the numbers could not be fetched, usually
/// because the token lacks push access to the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSummary {
    pub accessible: bool,
    pub sum_uniques: u64,
    pub today_uniques: u64,
}

/// Dependabot alert (`GET /repos/{owner}/{repo}/dependabot/alerts`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependabotAlert {
    /// open, dismissed, fixed, auto_dismissed
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub security_advisory: SecurityAdvisory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityAdvisory {
    /// low, medium, high, critical
    #[serde(default)]
    pub severity: String,
}

/// Open Dependabot alerts counted by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertSeverityCounts(pub BTreeMap<String, u64>);

impl AlertSeverityCounts {
    /// Count the open alerts in `alerts`
    pub fn from_alerts(alerts: &[DependabotAlert]) -> Self {
        let mut counts = BTreeMap::new();
        for alert in alerts.iter().filter(|a| a.state == "open") {
            *counts
                .entry(alert.security_advisory.severity.clone())
                .or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Open alerts of one severity
    pub fn get(&self, severity: &str) -> u64 {
        self.0.get(severity).copied().unwrap_or(0)
    }

    /// All open alerts
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which Next.js routers a repository uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterUsage {
    /// `pages/_app.{jsx,tsx}` exists
    pub pages_router: bool,

    /// `app/layout.{jsx,tsx}` exists
    pub app_router: bool,
}

impl RouterUsage {
    /// Human readable description of the router layout
    pub fn label(&self) -> &'static str {
        match (self.pages_router, self.app_router) {
            (true, true) => "Next.js project using both Pages and App",
            (true, false) => "Next.js project using Pages",
            (false, true) => "Next.js project using App Router",
            (false, false) => "Next.js project using neither Pages nor App Router",
        }
    }
}
