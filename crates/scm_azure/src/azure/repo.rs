//! Repository operations: lookup, commit statuses, and webhook
//! reconciliation.
//!
//! Azure DevOps has no "list hooks for this repository" primitive, so hook
//! lookup fetches the account-wide subscription list and filters it by the
//! repository id embedded in each subscription's publisher inputs. Every
//! reconciliation is O(total account subscriptions); that is a structural
//! provider limitation, not something this layer optimizes away.

use async_trait::async_trait;
use uuid::Uuid;

use crate::scm::{
    CombinedStatus, Hook, HookInput, Repository, RepositoryService, Result, ScmError, State,
    Status, StatusInput, User,
};

use super::client::AzureClient;
use super::convert::{
    convert_from_state, convert_repository, convert_repository_list, convert_status,
    convert_status_list, convert_subscription, hook_events, required,
};
use super::error::AzureError;
use super::types::{GitStatus, GitStatusContext, Subscription};

/// Genre stamped on statuses this driver creates.
const STATUS_GENRE: &str = "scm-azure";

impl AzureClient {
    /// Fetch the repository and return its opaque id together with the
    /// owning project id, as the subscription payloads reference them.
    async fn repository_routing_ids(&self, repo: &str) -> Result<(String, String)> {
        let git_repo = self.get_repository(repo).await?;
        let repo_id = required("repository.id", &git_repo.id)?.clone();
        let project = required("repository.project", &git_repo.project)?;
        let project_id = required("repository.project.id", &project.id)?.clone();
        Ok((repo_id, project_id))
    }

    /// Fetch all subscriptions of the account and keep those belonging to
    /// the repository.
    async fn subscriptions_for_repository(&self, repo: &str) -> Result<Vec<Subscription>> {
        let git_repo = self.get_repository(repo).await?;
        let repo_id = required("repository.id", &git_repo.id)?.clone();

        let subscriptions = self.list_subscriptions().await?;
        let total = subscriptions.len();
        let matched: Vec<Subscription> = subscriptions
            .into_iter()
            .filter(|s| s.repository_id() == Some(repo_id.as_str()))
            .collect();
        tracing::debug!(
            repo,
            total,
            matched = matched.len(),
            "reconciled account subscriptions"
        );
        Ok(matched)
    }
}

#[async_trait]
impl RepositoryService for AzureClient {
    async fn find(&self, repo: &str) -> Result<Repository> {
        let out = self.get_repository(repo).await?;
        convert_repository(&out)
    }

    async fn list(&self) -> Result<Vec<Repository>> {
        let out = self.list_repositories().await?;
        convert_repository_list(&out)
    }

    async fn list_status(&self, repo: &str, reference: &str) -> Result<Vec<Status>> {
        let out = self.get_statuses(repo, reference).await?;
        convert_status_list(&out)
    }

    async fn create_status(
        &self,
        repo: &str,
        reference: &str,
        input: &StatusInput,
    ) -> Result<Status> {
        let status = GitStatus {
            state: Some(convert_from_state(input.state)),
            description: Some(input.desc.clone()),
            target_url: Some(input.target.clone()),
            context: Some(GitStatusContext {
                genre: Some(STATUS_GENRE.to_string()),
                name: Some(input.label.clone()),
            }),
        };
        let out = self.post_status(repo, reference, &status).await?;
        convert_status(&out)
    }

    async fn find_combined_status(&self, repo: &str, reference: &str) -> Result<CombinedStatus> {
        let statuses = self.list_status(repo, reference).await?;
        // Aggregate is the most-recently-listed status in provider order,
        // unknown when the list is empty.
        let state = statuses.first().map_or(State::Unknown, |s| s.state);
        Ok(CombinedStatus {
            state,
            sha: reference.to_string(),
            statuses,
        })
    }

    async fn create_hook(&self, repo: &str, input: &HookInput) -> Result<Hook> {
        let (repo_id, project_id) = self.repository_routing_ids(repo).await?;
        let events = hook_events(&input.events);

        // One subscription per fanned-out event type. A failure part-way
        // through aborts without rolling back earlier creations; callers
        // reconcile by listing hooks afterwards.
        let mut created = Vec::new();
        for event in events {
            let subscription = Subscription {
                action_description: Some("hook".to_string()),
                consumer_id: Some("webHooks".to_string()),
                consumer_action_id: Some("httpRequest".to_string()),
                publisher_id: Some("tfs".to_string()),
                event_type: Some(event.to_string()),
                consumer_inputs: Some(
                    [("url".to_string(), input.target.clone())].into_iter().collect(),
                ),
                publisher_inputs: Some(
                    [
                        ("projectId".to_string(), project_id.clone()),
                        ("repository".to_string(), repo_id.clone()),
                    ]
                    .into_iter()
                    .collect(),
                ),
                ..Subscription::default()
            };
            let out = self.create_subscription(&subscription).await?;
            tracing::debug!(repo, event, id = ?out.id, "created hook subscription");
            created.push(convert_subscription(&out)?);
        }

        // The canonical result is the hook derived from the first created
        // subscription, representative of the set rather than the whole of
        // it.
        created
            .into_iter()
            .next()
            .ok_or_else(|| ScmError::transport("unable to create hook: no events requested"))
    }

    async fn find_hook(&self, repo: &str, id: &str) -> Result<Hook> {
        let subscriptions = self.subscriptions_for_repository(repo).await?;
        for subscription in &subscriptions {
            if subscription.id.as_deref() == Some(id) {
                return convert_subscription(subscription);
            }
        }
        Err(ScmError::hook_not_found(id))
    }

    async fn list_hooks(&self, repo: &str) -> Result<Vec<Hook>> {
        let subscriptions = self.subscriptions_for_repository(repo).await?;
        subscriptions.iter().map(convert_subscription).collect()
    }

    async fn delete_hook(&self, _repo: &str, id: &str) -> Result<()> {
        let subscription_id = Uuid::parse_str(id)
            .map_err(|_| AzureError::InvalidSubscriptionId(id.to_string()))?;
        self.delete_subscription(&subscription_id).await?;
        Ok(())
    }

    async fn is_collaborator(&self, _repo: &str, _user: &str) -> Result<bool> {
        Err(ScmError::not_supported("repository.is_collaborator"))
    }

    async fn add_collaborator(&self, _repo: &str, _user: &str, _permission: &str) -> Result<bool> {
        Err(ScmError::not_supported("repository.add_collaborator"))
    }

    async fn list_collaborators(&self, _repo: &str) -> Result<Vec<User>> {
        Err(ScmError::not_supported("repository.list_collaborators"))
    }
}
