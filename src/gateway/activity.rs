//! Activity summary folded from public events

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::Event;

/// Counts of what the user did, derived from their public events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub commits: u64,
    pub reviews: u64,
    pub prs_opened: u64,
    pub prs_merged: u64,
    pub comments_created: u64,
    pub comments_edited: u64,
    pub branches: u64,
    pub tags: u64,

    /// Number of events per event type
    pub by_type: BTreeMap<String, u64>,
}

impl ActivitySummary {
    pub fn from_events(events: &[Event]) -> Self {
        let mut summary = Self::default();
        for event in events {
            summary.record(event);
        }
        summary
    }

    fn record(&mut self, event: &Event) {
        let action = event.action();

        match event.kind.as_str() {
            "PushEvent" => {
                self.commits = self.commits.saturating_add(event.payload.size.unwrap_or(0));
            }
            "PullRequestReviewEvent" => self.reviews += 1,
            "IssueCommentEvent" => match action {
                Some("created") => self.comments_created += 1,
                Some("edited") => self.comments_edited += 1,
                _ => {}
            },
            "PullRequestEvent" => {
                let merged = event
                    .payload
                    .pull_request
                    .as_ref()
                    .is_some_and(|pr| pr.merged);
                match action {
                    Some("opened") => self.prs_opened += 1,
                    Some("closed") if merged => self.prs_merged += 1,
                    _ => {}
                }
            }
            "CreateEvent" => {
                if event.payload.ref_type.as_deref() == Some("tag") {
                    self.tags += 1;
                } else {
                    self.branches += 1;
                }
            }
            _ => {}
        }

        *self.by_type.entry(event.kind.clone()).or_default() += 1;
    }

    pub fn total_events(&self) -> u64 {
        self.by_type.values().sum()
    }

    /// Human readable list such as "pushed 2 commits, reviewed 1 PR".
    ///
    /// Zero counts are left out; edited comments are never mentioned.
    pub fn sentence(&self) -> String {
        let parts = [
            (self.commits, "pushed", "commit", "commits"),
            (self.reviews, "reviewed", "PR", "PRs"),
            (self.prs_opened, "opened", "PR", "PRs"),
            (self.prs_merged, "merged", "PR", "PRs"),
            (self.comments_created, "made", "comment", "comments"),
            (self.branches, "created", "branch", "branches"),
            (self.tags, "created", "tag", "tags"),
        ];

        parts
            .iter()
            .filter(|(count, ..)| *count > 0)
            .map(|(count, verb, one, many)| {
                let noun = if *count == 1 { one } else { many };
                format!("{} {} {}", verb, count, noun)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Full sentence for the profile, `None` when nothing is worth saying
    pub fn headline(&self) -> Option<String> {
        let sentence = self.sentence();
        if sentence.is_empty() {
            return None;
        }
        Some(format!(
            "In the last 90 days on GitHub I {} in public repositories.",
            sentence
        ))
    }
}
