//! Activity display model

use serde::Serialize;
use tabled::Tabled;

use crate::gateway::ActivitySummary;

/// Event count per event type
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ActivityDisplay {
    #[tabled(rename = "EVENT")]
    pub kind: String,

    #[tabled(rename = "COUNT")]
    pub count: u64,
}

impl ActivityDisplay {
    /// One row per event type, most frequent first, then a `TOTAL` row
    pub fn rows(summary: &ActivitySummary) -> Vec<Self> {
        let mut rows: Vec<Self> = summary
            .by_type
            .iter()
            .map(|(kind, count)| Self {
                kind: kind.clone(),
                count: *count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.kind.cmp(&b.kind)));

        if !rows.is_empty() {
            rows.push(Self {
                kind: "TOTAL".to_string(),
                count: summary.total_events(),
            });
        }
        rows
    }
}
