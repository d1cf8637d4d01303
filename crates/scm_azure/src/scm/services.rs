use async_trait::async_trait;

use super::errors::Result;
use super::types::{
    Change, Commit, CombinedStatus, CommitListOptions, Hook, HookInput, Reference, Repository,
    Review, ReviewInput, Status, StatusInput, User,
};

/// Repository-scoped operations: lookup, statuses, and webhooks.
///
/// Implementations are stateless between calls; every operation is a single
/// request/response against the provider and returns freshly constructed
/// canonical values.
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// Fetch a single repository by name or id.
    async fn find(&self, repo: &str) -> Result<Repository>;

    /// List the repositories of the configured project.
    async fn list(&self) -> Result<Vec<Repository>>;

    /// List all statuses reported for a commit.
    async fn list_status(&self, repo: &str, reference: &str) -> Result<Vec<Status>>;

    /// Create a commit status.
    async fn create_status(
        &self,
        repo: &str,
        reference: &str,
        input: &StatusInput,
    ) -> Result<Status>;

    /// Fetch all statuses for a commit together with an aggregate state.
    async fn find_combined_status(&self, repo: &str, reference: &str) -> Result<CombinedStatus>;

    /// Create a webhook for the requested events.
    ///
    /// One provider subscription is created per fanned-out event type. The
    /// first failing creation aborts the operation without rolling back
    /// subscriptions already created; the returned hook is derived from the
    /// first created subscription. Callers needing the full set should list
    /// hooks afterwards.
    async fn create_hook(&self, repo: &str, input: &HookInput) -> Result<Hook>;

    /// Find one webhook of this repository by subscription id.
    async fn find_hook(&self, repo: &str, id: &str) -> Result<Hook>;

    /// List all webhooks of this repository.
    async fn list_hooks(&self, repo: &str) -> Result<Vec<Hook>>;

    /// Delete a webhook subscription by id.
    async fn delete_hook(&self, repo: &str, id: &str) -> Result<()>;

    /// Check whether a user is a collaborator. Not supported on this provider.
    async fn is_collaborator(&self, repo: &str, user: &str) -> Result<bool>;

    /// Add a collaborator. Not supported on this provider.
    async fn add_collaborator(&self, repo: &str, user: &str, permission: &str) -> Result<bool>;

    /// List collaborators. Not supported on this provider.
    async fn list_collaborators(&self, repo: &str) -> Result<Vec<User>>;
}

/// Git data operations: branches, commits, and refs.
#[async_trait]
pub trait GitService: Send + Sync {
    /// Fetch a branch and resolve it to a fully qualified reference.
    async fn find_branch(&self, repo: &str, name: &str) -> Result<Reference>;

    /// Fetch a single commit.
    async fn find_commit(&self, repo: &str, reference: &str) -> Result<Commit>;

    /// Resolve a ref to its commit sha.
    async fn find_ref(&self, repo: &str, reference: &str) -> Result<String>;

    /// List all branches of a repository.
    async fn list_branches(&self, repo: &str) -> Result<Vec<Reference>>;

    /// List commits, optionally scoped to a ref or a sha.
    ///
    /// When both are supplied the sha wins as the effective query version;
    /// when neither is supplied the default branch history is returned.
    async fn list_commits(&self, repo: &str, opts: &CommitListOptions) -> Result<Vec<Commit>>;

    /// Fetch a tag. Not representable through this provider's surfaced API.
    async fn find_tag(&self, repo: &str, name: &str) -> Result<Reference>;

    /// List tags. Not representable through this provider's surfaced API.
    async fn list_tags(&self, repo: &str) -> Result<Vec<Reference>>;

    /// List changed paths of a commit. Not supported on this provider.
    async fn list_changes(&self, repo: &str, reference: &str) -> Result<Vec<Change>>;

    /// Compare two commits. Not supported on this provider.
    async fn compare_commits(&self, repo: &str, base: &str, head: &str) -> Result<Vec<Change>>;

    /// Create a ref. Not supported on this provider.
    async fn create_ref(&self, repo: &str, reference: &str, sha: &str) -> Result<Reference>;

    /// Delete a ref. Not supported on this provider.
    async fn delete_ref(&self, repo: &str, reference: &str) -> Result<()>;
}

/// Code-review operations.
///
/// Azure DevOps exposes no review primitive distinct from pull requests in
/// the surfaced scope, so every operation returns
/// [`ScmError::NotSupported`](super::ScmError::NotSupported).
#[async_trait]
pub trait ReviewService: Send + Sync {
    async fn find(&self, repo: &str, number: i64) -> Result<Review>;

    async fn list(&self, repo: &str, number: i64) -> Result<Vec<Review>>;

    async fn create(&self, repo: &str, number: i64, input: &ReviewInput) -> Result<Review>;

    async fn delete(&self, repo: &str, number: i64, id: i64) -> Result<()>;
}
