//! Project display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY, checkmark, format_date, or_empty, truncate_string};
use crate::gateway::Project;

/// Project row for table output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProjectDisplay {
    #[tabled(rename = "PIN")]
    pub pinned: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "STARS")]
    pub stars: u64,

    #[tabled(rename = "LANGUAGE")]
    pub language: String,

    /// Vercel framework preset when deployed on Vercel
    #[tabled(rename = "VERCEL")]
    pub vercel: String,

    #[tabled(rename = "FRAMEWORKS")]
    pub frameworks: String,

    #[tabled(rename = "UPDATED")]
    pub updated: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&Project> for ProjectDisplay {
    fn from(project: &Project) -> Self {
        let repo = &project.repository;

        let vercel = match &project.vercel {
            Some(v) => v.framework.clone().unwrap_or_else(|| "\u{2713}".to_string()),
            None => String::new(),
        };

        let frameworks = if project.frameworks.is_empty() {
            EMPTY.to_string()
        } else {
            project
                .frameworks
                .iter()
                .map(|f| {
                    if f.has_upgrade {
                        format!("{} {} \u{2191}", f.name, f.version)
                    } else {
                        format!("{} {}", f.name, f.version)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            pinned: checkmark(project.pinned),
            name: repo.name.clone(),
            stars: repo.stargazers_count,
            language: or_empty(repo.language.as_deref()),
            vercel,
            frameworks,
            updated: format_date(repo.updated_at),
            description: truncate_string(repo.description.as_deref().unwrap_or(EMPTY), 50),
        }
    }
}
