//! Azure DevOps REST client: routing context plus typed API calls.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpHeaders, HttpMethod, HttpRequest, HttpTransport};
use crate::scm::ScmError;

use super::endpoint::Endpoint;
use super::error::AzureError;
use super::types::{
    GitBranchStats, GitCommit, GitRepository, GitStatus, ListEnvelope, Subscription,
};

/// REST API version pinned for every call.
const API_VERSION: &str = "6.0";

/// Default transport timeout.
const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Client for one Azure DevOps organization/project pair.
///
/// The routing context is resolved once at construction and the transport
/// connection is assumed to outlive all calls. The client keeps no other
/// state: concurrent calls are safe without locking, and nothing is cached
/// between them.
#[derive(Clone)]
pub struct AzureClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: Endpoint,
    authorization: String,
}

impl std::fmt::Debug for AzureClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl AzureClient {
    /// Create a client from a base URI and a personal access token.
    ///
    /// The URI must carry `/organization/project` in its path; anything
    /// shorter fails with [`ScmError::InvalidEndpoint`].
    pub fn new(uri: &str, token: &str) -> Result<Self, ScmError> {
        let transport = ReqwestTransport::with_timeout(REQUEST_TIMEOUT)
            .map_err(|e| ScmError::transport(e.to_string()))?;
        Self::with_transport(uri, token, Arc::new(transport))
    }

    /// Create a client over an injected transport.
    pub fn with_transport(
        uri: &str,
        token: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ScmError> {
        let endpoint = Endpoint::parse(uri)?;
        // PATs authenticate as basic auth with an empty username.
        let authorization = format!("Basic {}", BASE64.encode(format!(":{}", token)));
        Ok(Self {
            transport,
            endpoint,
            authorization,
        })
    }

    /// The organization segment of the routing context.
    pub fn organization(&self) -> &str {
        &self.endpoint.organization
    }

    /// The project segment of the routing context.
    pub fn project(&self) -> &str {
        &self.endpoint.project
    }

    fn api_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}{}?api-version={}",
            self.endpoint.base, path, API_VERSION
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.extend(url::form_urlencoded::byte_serialize(value.as_bytes()));
        }
        url
    }

    fn repo_path(&self, repo: &str, tail: &str) -> String {
        format!(
            "{}/_apis/git/repositories/{}{}",
            self.endpoint.project, repo, tail
        )
    }

    fn headers(&self, has_body: bool) -> HttpHeaders {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), "scm-azure".to_string()),
            ("Authorization".to_string(), self.authorization.clone()),
        ];
        if has_body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, AzureError> {
        tracing::debug!(%url, "azure api GET");
        let request = HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: self.headers(false),
            body: Vec::new(),
        };

        let response = self.transport.send(request).await?;
        if !(200..300).contains(&response.status) {
            return Err(AzureError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        serde_json::from_slice(&response.body).map_err(AzureError::Json)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: String,
        body: &B,
    ) -> Result<T, AzureError> {
        tracing::debug!(%url, "azure api POST");
        let request = HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: self.headers(true),
            body: serde_json::to_vec(body).map_err(AzureError::Json)?,
        };

        let response = self.transport.send(request).await?;
        if !(200..300).contains(&response.status) {
            return Err(AzureError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        serde_json::from_slice(&response.body).map_err(AzureError::Json)
    }

    async fn delete(&self, url: String) -> Result<(), AzureError> {
        tracing::debug!(%url, "azure api DELETE");
        let request = HttpRequest {
            method: HttpMethod::Delete,
            url,
            headers: self.headers(false),
            body: Vec::new(),
        };

        let response = self.transport.send(request).await?;
        if !(200..300).contains(&response.status) {
            return Err(AzureError::Api {
                status: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }
        Ok(())
    }

    pub(crate) async fn get_repository(&self, repo: &str) -> Result<GitRepository, AzureError> {
        let url = self.api_url(&self.repo_path(repo, ""), &[]);
        self.get_json(url).await
    }

    pub(crate) async fn list_repositories(&self) -> Result<Vec<GitRepository>, AzureError> {
        let url = self.api_url(
            &format!("{}/_apis/git/repositories", self.endpoint.project),
            &[],
        );
        let envelope: ListEnvelope<GitRepository> = self.get_json(url).await?;
        Ok(envelope.value)
    }

    pub(crate) async fn get_branch(
        &self,
        repo: &str,
        name: &str,
    ) -> Result<GitBranchStats, AzureError> {
        let url = self.api_url(&self.repo_path(repo, "/stats/branches"), &[("name", name)]);
        self.get_json(url).await
    }

    pub(crate) async fn get_branch_list(&self, repo: &str) -> Result<Vec<GitBranchStats>, AzureError> {
        let url = self.api_url(&self.repo_path(repo, "/stats/branches"), &[]);
        let envelope: ListEnvelope<GitBranchStats> = self.get_json(url).await?;
        Ok(envelope.value)
    }

    pub(crate) async fn get_commit(&self, repo: &str, sha: &str) -> Result<GitCommit, AzureError> {
        let url = self.api_url(&self.repo_path(repo, &format!("/commits/{}", sha)), &[]);
        self.get_json(url).await
    }

    /// List commits, optionally pinned to a resolved query version.
    ///
    /// Continuation tokens are not yet iterated; only the first page is
    /// returned.
    pub(crate) async fn get_commit_list(
        &self,
        repo: &str,
        version: Option<&str>,
    ) -> Result<Vec<GitCommit>, AzureError> {
        let path = self.repo_path(repo, "/commits");
        let url = match version {
            Some(version) => {
                self.api_url(&path, &[("searchCriteria.itemVersion.version", version)])
            }
            None => self.api_url(&path, &[]),
        };
        let envelope: ListEnvelope<GitCommit> = self.get_json(url).await?;
        Ok(envelope.value)
    }

    pub(crate) async fn get_statuses(
        &self,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<GitStatus>, AzureError> {
        let url = self.api_url(
            &self.repo_path(repo, &format!("/commits/{}/statuses", sha)),
            &[("latestOnly", "false")],
        );
        let envelope: ListEnvelope<GitStatus> = self.get_json(url).await?;
        Ok(envelope.value)
    }

    pub(crate) async fn post_status(
        &self,
        repo: &str,
        sha: &str,
        status: &GitStatus,
    ) -> Result<GitStatus, AzureError> {
        let url = self.api_url(
            &self.repo_path(repo, &format!("/commits/{}/statuses", sha)),
            &[],
        );
        self.post_json(url, status).await
    }

    /// List every service-hook subscription of the organization.
    ///
    /// There is no repository-scoped listing on this provider; callers
    /// filter the account-wide result.
    pub(crate) async fn list_subscriptions(&self) -> Result<Vec<Subscription>, AzureError> {
        let url = self.api_url("_apis/hooks/subscriptions", &[]);
        let envelope: ListEnvelope<Subscription> = self.get_json(url).await?;
        Ok(envelope.value)
    }

    pub(crate) async fn create_subscription(
        &self,
        subscription: &Subscription,
    ) -> Result<Subscription, AzureError> {
        let url = self.api_url("_apis/hooks/subscriptions", &[]);
        self.post_json(url, subscription).await
    }

    pub(crate) async fn delete_subscription(&self, id: &Uuid) -> Result<(), AzureError> {
        let url = self.api_url(&format!("_apis/hooks/subscriptions/{}", id), &[]);
        self.delete(url).await
    }
}
