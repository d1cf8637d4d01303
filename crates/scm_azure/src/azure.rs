//! Azure DevOps driver.
//!
//! [`AzureClient`] speaks the REST 6.0 API behind the canonical service
//! traits in [`crate::scm`]. Endpoint URLs carry the organization and
//! project (`https://dev.azure.com/{organization}/{project}`); everything
//! repository-scoped resolves relative to that pair.

pub mod client;
pub mod convert;
pub mod endpoint;
pub mod error;
pub mod types;

mod git;
mod repo;
mod review;

pub use client::AzureClient;
pub use endpoint::Endpoint;
pub use error::AzureError;
