//! Canonical, provider-agnostic SCM model.
//!
//! This module defines the domain shapes (repository, reference, commit,
//! status, hook) shared by all drivers, the service traits a driver
//! implements, and the error taxonomy surfaced to callers.
//!
//! # Example
//!
//! ```ignore
//! use scm_azure::scm::{GitService, RepositoryService};
//!
//! async fn head_sha<C>(client: &C, repo: &str) -> Result<String, scm_azure::ScmError>
//! where
//!     C: RepositoryService + GitService,
//! {
//!     let repository = client.find(repo).await?;
//!     let branch = client.find_branch(repo, &repository.branch).await?;
//!     Ok(branch.sha)
//! }
//! ```

mod errors;
mod services;
mod types;

pub use errors::{Result, ScmError};
pub use services::{GitService, RepositoryService, ReviewService};
pub use types::{
    Change, Commit, CombinedStatus, CommitListOptions, Hook, HookEvents, HookInput, Perm,
    Reference, Repository, Review, ReviewInput, Signature, State, Status, StatusInput, User,
    expand_ref,
};
