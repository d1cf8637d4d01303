//! Azure DevOps REST payload types.
//!
//! These structs mirror only the fields this driver consumes of the REST
//! 6.0 data model. Every field the provider models as a nullable pointer is
//! an `Option` here; the converters decide which absences are errors.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// List responses come wrapped in a `{count, value}` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// A git repository.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepository {
    pub id: Option<String>,
    pub name: Option<String>,
    pub default_branch: Option<String>,
    pub remote_url: Option<String>,
    pub ssh_url: Option<String>,
    pub web_url: Option<String>,
    pub project: Option<TeamProjectReference>,
}

/// The project a repository belongs to.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProjectReference {
    pub id: Option<String>,
    pub name: Option<String>,
    /// "private", "public", or values this driver does not interpret.
    pub visibility: Option<String>,
    pub last_update_time: Option<DateTime<Utc>>,
}

/// Branch statistics; the only branch representation the surfaced API has.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitBranchStats {
    pub name: Option<String>,
    pub commit: Option<GitCommitRef>,
}

/// Shallow commit reference carried by branch stats.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommitRef {
    pub commit_id: Option<String>,
}

/// A full commit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommit {
    pub commit_id: Option<String>,
    pub comment: Option<String>,
    pub author: Option<GitUserDate>,
    pub committer: Option<GitUserDate>,
    pub remote_url: Option<String>,
    pub tree_id: Option<String>,
}

/// Author/committer identity on a commit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitUserDate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

/// Commit status state in the provider's four-state model.
///
/// `Unknown` is the forward-compatible catch-all for values this driver
/// does not recognize; deserializing one is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GitStatusState {
    NotSet,
    Pending,
    Succeeded,
    Failed,
    Error,
    #[serde(other)]
    Unknown,
}

/// A commit status, read and written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<GitStatusState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<GitStatusContext>,
}

/// Status name/genre pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitStatusContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A service-hook subscription, the provider's webhook registration record.
///
/// The consumer/publisher input maps are opaque key-value payloads; code
/// outside this module reads them only through the typed accessors below,
/// never as raw maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_inputs: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_inputs: Option<HashMap<String, String>>,
}

impl Subscription {
    /// The repository id this subscription publishes for, if any.
    #[must_use]
    pub fn repository_id(&self) -> Option<&str> {
        self.publisher_inputs
            .as_ref()
            .and_then(|m| m.get("repository"))
            .map(String::as_str)
    }

    /// The project id this subscription publishes for, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.publisher_inputs
            .as_ref()
            .and_then(|m| m.get("projectId"))
            .map(String::as_str)
    }

    /// The delivery URL this subscription posts to, if any.
    #[must_use]
    pub fn target_url(&self) -> Option<&str> {
        self.consumer_inputs
            .as_ref()
            .and_then(|m| m.get("url"))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_count_and_value() {
        let raw = r#"{"count":2,"value":[{"name":"a"},{"name":"b"}]}"#;
        let envelope: ListEnvelope<GitBranchStats> =
            serde_json::from_str(raw).expect("envelope should decode");
        assert_eq!(envelope.count, Some(2));
        assert_eq!(envelope.value.len(), 2);
        assert_eq!(envelope.value[0].name.as_deref(), Some("a"));
    }

    #[test]
    fn status_state_deserializes_unrecognized_values_as_unknown() {
        let state: GitStatusState =
            serde_json::from_str(r#""somethingNew""#).expect("unrecognized value should decode");
        assert_eq!(state, GitStatusState::Unknown);

        let state: GitStatusState = serde_json::from_str(r#""succeeded""#).expect("known value");
        assert_eq!(state, GitStatusState::Succeeded);
    }

    #[test]
    fn status_serializes_camel_case_without_absent_fields() {
        let status = GitStatus {
            state: Some(GitStatusState::Pending),
            description: Some("building".to_string()),
            target_url: None,
            context: Some(GitStatusContext {
                genre: Some("ci".to_string()),
                name: Some("build".to_string()),
            }),
        };

        let raw = serde_json::to_string(&status).expect("status should serialize");
        assert!(raw.contains(r#""state":"pending""#));
        assert!(!raw.contains("targetUrl"));
        assert!(raw.contains(r#""genre":"ci""#));
    }

    #[test]
    fn subscription_accessors_read_the_opaque_maps() {
        let raw = r#"{
            "id": "sub-1",
            "eventType": "git.push",
            "consumerInputs": {"url": "https://ci.example/hook"},
            "publisherInputs": {"projectId": "proj-1", "repository": "repo-1"}
        }"#;
        let sub: Subscription = serde_json::from_str(raw).expect("subscription should decode");

        assert_eq!(sub.repository_id(), Some("repo-1"));
        assert_eq!(sub.project_id(), Some("proj-1"));
        assert_eq!(sub.target_url(), Some("https://ci.example/hook"));
    }

    #[test]
    fn subscription_accessors_tolerate_missing_maps() {
        let sub = Subscription::default();
        assert_eq!(sub.repository_id(), None);
        assert_eq!(sub.project_id(), None);
        assert_eq!(sub.target_url(), None);
    }
}
