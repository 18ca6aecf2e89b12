//! Key/value rows for single-record views

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY, checkmark, or_empty};
use crate::gateway::{Profile, RepoInsights};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FieldDisplay {
    #[tabled(rename = "FIELD")]
    pub field: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl FieldDisplay {
    fn new(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

pub fn profile_fields(profile: &Profile) -> Vec<FieldDisplay> {
    let user = &profile.user;
    let organizations = profile
        .organizations
        .iter()
        .map(|o| o.display_name().to_string())
        .collect::<Vec<_>>();

    vec![
        FieldDisplay::new("Name", user.display_name()),
        FieldDisplay::new("Login", user.login.as_str()),
        FieldDisplay::new("Bio", or_empty(user.bio.as_deref())),
        FieldDisplay::new("Company", or_empty(user.company.as_deref())),
        FieldDisplay::new("Location", or_empty(user.location.as_deref())),
        FieldDisplay::new("Website", or_empty(user.website())),
        FieldDisplay::new("Followers", user.followers.to_string()),
        FieldDisplay::new("Public repos", user.public_repos.to_string()),
        FieldDisplay::new(
            "Organizations",
            if organizations.is_empty() {
                EMPTY.to_string()
            } else {
                organizations.join(", ")
            },
        ),
        FieldDisplay::new("Activity", or_empty(profile.headline.as_deref())),
        FieldDisplay::new("Copilot PRs", profile.copilot_merged_prs.to_string()),
    ]
}

pub fn insight_fields(insights: &RepoInsights) -> Vec<FieldDisplay> {
    let traffic = if insights.traffic.accessible {
        format!(
            "{} unique visitors, {} today",
            insights.traffic.sum_uniques, insights.traffic.today_uniques
        )
    } else {
        "not accessible".to_string()
    };

    let alerts = if insights.alerts.is_empty() {
        "none".to_string()
    } else {
        let by_severity = insights
            .alerts
            .0
            .iter()
            .map(|(severity, count)| format!("{} {}", count, severity))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} open ({})", insights.alerts.total(), by_severity)
    };

    let frameworks = if insights.frameworks.is_empty() {
        EMPTY.to_string()
    } else {
        insights
            .frameworks
            .iter()
            .map(|f| match (&f.latest_version, f.has_upgrade) {
                (Some(latest), true) => format!("{} {} (latest {})", f.name, f.version, latest),
                _ => format!("{} {}", f.name, f.version),
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        FieldDisplay::new("Repository", format!("{}/{}", insights.owner, insights.name)),
        FieldDisplay::new("Frameworks", frameworks),
        FieldDisplay::new("Router", insights.router_label.as_str()),
        FieldDisplay::new("Turbopack", checkmark(insights.turbopack)),
        FieldDisplay::new("Traffic (14 days)", traffic),
        FieldDisplay::new("Dependabot alerts", alerts),
        FieldDisplay::new("Copilot PRs", insights.copilot_merged_prs.to_string()),
    ]
}
