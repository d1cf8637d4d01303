//! Review operations.
//!
//! The provider has no review comment API this driver surfaces yet; every
//! operation reports itself as unsupported so callers can branch on it.

use async_trait::async_trait;

use crate::scm::{Result, Review, ReviewInput, ReviewService, ScmError};

use super::client::AzureClient;

#[async_trait]
impl ReviewService for AzureClient {
    async fn find(&self, _repo: &str, _number: i64) -> Result<Review> {
        Err(ScmError::not_supported("review.find"))
    }

    async fn list(&self, _repo: &str, _number: i64) -> Result<Vec<Review>> {
        Err(ScmError::not_supported("review.list"))
    }

    async fn create(&self, _repo: &str, _number: i64, _input: &ReviewInput) -> Result<Review> {
        Err(ScmError::not_supported("review.create"))
    }

    async fn delete(&self, _repo: &str, _number: i64, _id: i64) -> Result<()> {
        Err(ScmError::not_supported("review.delete"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::MockTransport;

    #[tokio::test]
    async fn every_review_operation_is_not_supported() {
        let transport = MockTransport::new();
        let client = AzureClient::with_transport(
            "https://dev.azure.test/org/proj",
            "pat",
            Arc::new(transport.clone()),
        )
        .expect("endpoint should resolve");

        assert!(ReviewService::find(&client, "demo", 1)
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(ReviewService::list(&client, "demo", 1)
            .await
            .expect_err("unsupported")
            .is_not_supported());
        let input = ReviewInput::default();
        assert!(client
            .create("demo", 1, &input)
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(ReviewService::delete(&client, "demo", 1, 2)
            .await
            .expect_err("unsupported")
            .is_not_supported());
        assert!(transport.requests().is_empty());
    }
}
