//! Canonical source-control access for Azure DevOps.
//!
//! The [`scm`] module defines a provider-agnostic model of repositories,
//! refs, commits, statuses, and webhooks, plus the async service traits
//! that expose them. The [`azure`] module implements those traits against
//! the Azure DevOps REST API.
//!
//! ```no_run
//! use scm_azure::{AzureClient, GitService, RepositoryService};
//!
//! # async fn demo() -> Result<(), scm_azure::ScmError> {
//! let client = AzureClient::new("https://dev.azure.com/org/project", "pat")?;
//! let repo = client.find("my-repo").await?;
//! let branch = client.find_branch("my-repo", "main").await?;
//! println!("{} ({}) is at {}", branch.name, repo.branch, branch.sha);
//! # Ok(())
//! # }
//! ```

pub mod azure;
pub mod http;
pub mod scm;

pub use azure::{AzureClient, AzureError, Endpoint};
pub use scm::{GitService, RepositoryService, ReviewService, Result, ScmError};
