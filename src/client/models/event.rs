//! Public activity event models (`GET /users/{username}/events`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public GitHub event, reduced to the fields the activity summary reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,

    /// Event type, e.g. `PushEvent`
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub repo: EventRepo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRepo {
    /// `owner/name`
    #[serde(default)]
    pub name: String,
}

/// Union of the payload fields used across event types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Number of commits in a push
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// branch, tag or repository for `CreateEvent`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPullRequest {
    #[serde(default)]
    pub merged: bool,
}

impl Event {
    pub fn action(&self) -> Option<&str> {
        self.payload.action.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserializes_push() {
        let json = r#"{
            "id": "22249084947",
            "type": "PushEvent",
            "actor": { "login": "octocat" },
            "repo": { "id": 1, "name": "octocat/Hello-World" },
            "payload": { "push_id": 10115855396, "size": 3, "commits": [] },
            "created_at": "2026-10-01T12:00:00Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, "PushEvent");
        assert_eq!(event.repo.name, "octocat/Hello-World");
        assert_eq!(event.payload.size, Some(3));
        assert!(event.payload.pull_request.is_none());
    }

    #[test]
    fn test_event_deserializes_merged_pr() {
        let json = r#"{
            "id": "1",
            "type": "PullRequestEvent",
            "payload": { "action": "closed", "pull_request": { "merged": true, "number": 7 } }
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.action(), Some("closed"));
        assert!(event.payload.pull_request.unwrap().merged);
    }
}
