//! Framework status display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY, format_date};
use crate::gateway::FrameworkStatus;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FrameworkDisplay {
    #[tabled(rename = "FRAMEWORK")]
    pub name: String,

    #[tabled(rename = "VERSION")]
    pub version: String,

    #[tabled(rename = "LATEST")]
    pub latest: String,

    #[tabled(rename = "RELEASED")]
    pub released: String,

    #[tabled(rename = "UPGRADE")]
    pub upgrade: String,
}

impl From<&FrameworkStatus> for FrameworkDisplay {
    fn from(status: &FrameworkStatus) -> Self {
        Self {
            name: status.name.clone(),
            version: status.version.clone(),
            latest: status
                .latest_version
                .clone()
                .unwrap_or_else(|| EMPTY.to_string()),
            released: format_date(status.latest_updated_at),
            upgrade: if status.has_upgrade {
                "available".to_string()
            } else {
                String::new()
            },
        }
    }
}
