//! Git data operations: branches, commits, and ref resolution.

use async_trait::async_trait;

use crate::scm::{Change, Commit, CommitListOptions, GitService, Reference, Result, ScmError};

use super::client::AzureClient;
use super::convert::{convert_branch, convert_branch_list, convert_commit, convert_commit_list, required};

#[async_trait]
impl GitService for AzureClient {
    async fn find_branch(&self, repo: &str, name: &str) -> Result<Reference> {
        let out = self.get_branch(repo, name).await?;
        convert_branch(&out)
    }

    async fn find_commit(&self, repo: &str, reference: &str) -> Result<Commit> {
        let out = self.get_commit(repo, reference).await?;
        convert_commit(&out)
    }

    async fn find_ref(&self, repo: &str, reference: &str) -> Result<String> {
        let out = self.get_commit(repo, reference).await?;
        Ok(required("commit.commitId", &out.commit_id)?.clone())
    }

    async fn list_branches(&self, repo: &str) -> Result<Vec<Reference>> {
        let out = self.get_branch_list(repo).await?;
        convert_branch_list(&out)
    }

    async fn list_commits(&self, repo: &str, opts: &CommitListOptions) -> Result<Vec<Commit>> {
        // A commit sha is the stronger selector and wins over a branch
        // name; with neither, the provider walks the default branch.
        let mut version = opts.reference.as_deref();
        if let Some(sha) = opts.sha.as_deref() {
            if !sha.is_empty() {
                version = Some(sha);
            }
        }
        let out = self.get_commit_list(repo, version).await?;
        convert_commit_list(&out)
    }

    async fn find_tag(&self, _repo: &str, _name: &str) -> Result<Reference> {
        Err(ScmError::not_supported("git.find_tag"))
    }

    async fn list_tags(&self, _repo: &str) -> Result<Vec<Reference>> {
        Err(ScmError::not_supported("git.list_tags"))
    }

    async fn list_changes(&self, _repo: &str, _reference: &str) -> Result<Vec<Change>> {
        Err(ScmError::not_supported("git.list_changes"))
    }

    async fn compare_commits(&self, _repo: &str, _base: &str, _head: &str) -> Result<Vec<Change>> {
        Err(ScmError::not_supported("git.compare_commits"))
    }

    async fn create_ref(&self, _repo: &str, _reference: &str, _sha: &str) -> Result<Reference> {
        Err(ScmError::not_supported("git.create_ref"))
    }

    async fn delete_ref(&self, _repo: &str, _reference: &str) -> Result<()> {
        Err(ScmError::not_supported("git.delete_ref"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::{HttpMethod, HttpResponse, MockTransport};

    const BASE: &str = "https://dev.azure.test/org/proj/_apis/git/repositories/demo";

    fn client(transport: &MockTransport) -> AzureClient {
        AzureClient::with_transport(
            "https://dev.azure.test/org/proj",
            "pat",
            Arc::new(transport.clone()),
        )
        .expect("endpoint should resolve")
    }

    fn ok_json(body: impl AsRef<[u8]>) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.as_ref().to_vec(),
        }
    }

    fn commit_json(sha: &str) -> serde_json::Value {
        serde_json::json!({
            "commitId": sha,
            "comment": "change something",
            "author": {
                "name": "Alice",
                "email": "alice@example.com",
                "date": "2024-03-01T12:00:00Z",
                "imageUrl": "https://dev.azure.test/avatars/alice"
            },
            "committer": {
                "name": "Alice",
                "email": "alice@example.com",
                "date": "2024-03-01T12:00:00Z"
            },
            "remoteUrl": format!("https://dev.azure.test/org/proj/_git/demo/commit/{sha}")
        })
    }

    #[tokio::test]
    async fn find_branch_expands_the_short_name() {
        let transport = MockTransport::new();
        let url = format!("{BASE}/stats/branches?api-version=6.0&name=main");
        let body = serde_json::json!({"name": "main", "commit": {"commitId": "abc123"}});
        transport.push_response(HttpMethod::Get, url, ok_json(body.to_string()));

        let client = client(&transport);
        let branch = client.find_branch("demo", "main").await.expect("branch");

        assert_eq!(branch.name, "main");
        assert_eq!(branch.path, "refs/heads/main");
        assert_eq!(branch.sha, "abc123");
    }

    #[tokio::test]
    async fn find_commit_converts_author_and_committer() {
        let transport = MockTransport::new();
        let url = format!("{BASE}/commits/abc123?api-version=6.0");
        transport.push_response(HttpMethod::Get, url, ok_json(commit_json("abc123").to_string()));

        let client = client(&transport);
        let commit = client.find_commit("demo", "abc123").await.expect("commit");

        assert_eq!(commit.sha, "abc123");
        assert_eq!(commit.message, "change something");
        assert_eq!(commit.author.name, "Alice");
        assert_eq!(
            commit.author.avatar.as_deref(),
            Some("https://dev.azure.test/avatars/alice")
        );
        assert_eq!(commit.committer.avatar, None);
    }

    #[tokio::test]
    async fn find_ref_resolves_to_the_commit_sha() {
        let transport = MockTransport::new();
        let url = format!("{BASE}/commits/main?api-version=6.0");
        transport.push_response(HttpMethod::Get, url, ok_json(commit_json("abc123").to_string()));

        let client = client(&transport);
        let sha = client.find_ref("demo", "main").await.expect("resolved ref");
        assert_eq!(sha, "abc123");
    }

    #[tokio::test]
    async fn list_branches_converts_every_entry_or_fails_whole() {
        let transport = MockTransport::new();
        let url = format!("{BASE}/stats/branches?api-version=6.0");
        let body = serde_json::json!({
            "count": 2,
            "value": [
                {"name": "main", "commit": {"commitId": "abc123"}},
                {"name": "dev", "commit": {"commitId": "def456"}},
            ]
        });
        transport.push_response(HttpMethod::Get, url, ok_json(body.to_string()));

        let client = client(&transport);
        let branches = client.list_branches("demo").await.expect("branches");

        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].path, "refs/heads/main");
        assert_eq!(branches[1].sha, "def456");
    }

    #[tokio::test]
    async fn list_commits_with_no_selector_walks_the_default_branch() {
        let transport = MockTransport::new();
        let url = format!("{BASE}/commits?api-version=6.0");
        let body = serde_json::json!({"count": 1, "value": [commit_json("abc123")]});
        transport.push_response(HttpMethod::Get, url, ok_json(body.to_string()));

        let client = client(&transport);
        let commits = client
            .list_commits("demo", &CommitListOptions::default())
            .await
            .expect("commits");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].sha, "abc123");
    }

    #[tokio::test]
    async fn list_commits_prefers_the_sha_over_the_branch_name() {
        let transport = MockTransport::new();
        let url = format!(
            "{BASE}/commits?api-version=6.0&searchCriteria.itemVersion.version=abc123"
        );
        let body = serde_json::json!({"count": 1, "value": [commit_json("abc123")]});
        transport.push_response(HttpMethod::Get, url, ok_json(body.to_string()));

        let client = client(&transport);
        let opts = CommitListOptions {
            reference: Some("main".to_string()),
            sha: Some("abc123".to_string()),
        };
        let commits = client.list_commits("demo", &opts).await.expect("commits");
        assert_eq!(commits.len(), 1);
    }

    #[tokio::test]
    async fn list_commits_ignores_an_empty_sha() {
        let transport = MockTransport::new();
        let url = format!(
            "{BASE}/commits?api-version=6.0&searchCriteria.itemVersion.version=main"
        );
        let body = serde_json::json!({"count": 0, "value": []});
        transport.push_response(HttpMethod::Get, url, ok_json(body.to_string()));

        let client = client(&transport);
        let opts = CommitListOptions {
            reference: Some("main".to_string()),
            sha: Some(String::new()),
        };
        let commits = client.list_commits("demo", &opts).await.expect("commits");
        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn tag_and_ref_mutation_operations_are_not_supported() {
        let transport = MockTransport::new();
        let client = client(&transport);

        assert!(client
            .find_tag("demo", "v1.0.0")
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(client
            .list_tags("demo")
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(client
            .list_changes("demo", "abc123")
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(client
            .compare_commits("demo", "abc123", "def456")
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(client
            .create_ref("demo", "refs/heads/new", "abc123")
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(client
            .delete_ref("demo", "refs/heads/old")
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(transport.requests().is_empty());
    }
}
