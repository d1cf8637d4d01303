use chrono::{DateTime, Utc};

/// Commit status state in the canonical five-state model (plus unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Unknown,
    Error,
    Failure,
    Pending,
    Running,
    Success,
}

/// Repository permissions as granted to the authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Perm {
    pub push: bool,
    pub pull: bool,
    pub admin: bool,
}

/// A repository in the canonical, provider-agnostic shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Repository {
    /// Provider-assigned opaque identifier.
    pub id: String,
    /// Owning namespace (the project name on Azure DevOps).
    pub namespace: String,
    pub name: String,
    pub full_name: String,
    pub perm: Perm,
    /// Default branch, empty when the provider reports none.
    pub branch: String,
    pub private: bool,
    /// HTTP clone URL.
    pub clone: String,
    /// SSH clone URL.
    pub clone_ssh: String,
    /// Web link to the repository.
    pub link: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// A resolved git reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Short name, e.g. `main`.
    pub name: String,
    /// Fully qualified ref path, e.g. `refs/heads/main`.
    pub path: String,
    pub sha: String,
}

/// Commit author or committer identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
    /// Avatar URL; only present in some provider responses.
    pub avatar: Option<String>,
}

/// A commit in the canonical shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author: Signature,
    pub committer: Signature,
    /// Web link to the commit.
    pub link: String,
    pub tree_sha: String,
}

/// A single commit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub state: State,
    pub label: String,
    pub desc: String,
    pub target: String,
}

/// All statuses reported for one commit, with an aggregate state.
///
/// The aggregate is the state of the most-recently-listed status in the
/// provider-defined order, or [`State::Unknown`] when no statuses exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedStatus {
    pub state: State,
    pub sha: String,
    pub statuses: Vec<Status>,
}

/// A webhook registration in the canonical shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    pub id: String,
    pub name: String,
    pub target: String,
    /// Provider event names; never empty for a hook returned from list/find.
    pub events: Vec<String>,
    pub active: bool,
    pub skip_verify: bool,
}

/// Input for creating a commit status.
#[derive(Debug, Clone, Default)]
pub struct StatusInput {
    pub state: State,
    pub label: String,
    pub desc: String,
    pub target: String,
}

/// Canonical event-interest flags for webhook creation.
///
/// Each flag fans out to one or more provider event-type strings; two
/// different flags may map to the same string.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookEvents {
    pub push: bool,
    pub pull_request: bool,
    pub pull_request_comment: bool,
    pub review: bool,
    pub review_comment: bool,
    pub issue: bool,
    pub issue_comment: bool,
    pub release: bool,
}

/// Input for creating a webhook.
#[derive(Debug, Clone, Default)]
pub struct HookInput {
    pub name: String,
    /// Delivery URL placed in the subscription's consumer inputs.
    pub target: String,
    pub events: HookEvents,
}

/// Options for listing commits.
#[derive(Debug, Clone, Default)]
pub struct CommitListOptions {
    /// Branch or ref name to list from.
    pub reference: Option<String>,
    /// Commit sha to list from; wins over `reference` when both are set.
    pub sha: Option<String>,
}

/// A collaborator on a repository.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    pub login: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

/// A changed path between two trees.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Change {
    pub path: String,
    pub added: bool,
    pub renamed: bool,
    pub deleted: bool,
}

/// A code review.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Review {
    pub id: i64,
    pub body: String,
    pub sha: String,
    pub link: String,
}

/// Input for creating a code review.
#[derive(Debug, Clone, Default)]
pub struct ReviewInput {
    pub body: String,
    pub sha: String,
}

/// Qualify a short ref name under `prefix` unless it is already qualified.
#[must_use]
pub fn expand_ref(name: &str, prefix: &str) -> String {
    if name.starts_with("refs/") {
        name.to_string()
    } else {
        format!("{}{}", prefix, name)
    }
}
