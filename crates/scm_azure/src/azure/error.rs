//! Error types for Azure DevOps REST operations.

use thiserror::Error;

use crate::http::HttpError;
use crate::scm::ScmError;

/// Errors raised below the canonical service surface.
#[derive(Debug, Error)]
pub enum AzureError {
    /// The transport failed before a response was produced.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body did not decode as the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A subscription id that is not a UUID can never exist upstream.
    #[error("invalid subscription id: {0}")]
    InvalidSubscriptionId(String),
}

impl From<HttpError> for AzureError {
    fn from(err: HttpError) -> Self {
        AzureError::Http(err.to_string())
    }
}

impl From<AzureError> for ScmError {
    fn from(err: AzureError) -> Self {
        match err {
            AzureError::Http(message) => ScmError::Transport { message },
            AzureError::Json(e) => ScmError::Transport {
                message: format!("response decode: {}", e),
            },
            AzureError::Api { status: 404, message } => ScmError::NotFound { resource: message },
            AzureError::Api { status, message } => ScmError::Transport {
                message: format!("API error ({}): {}", status, message),
            },
            AzureError::InvalidSubscriptionId(id) => ScmError::Transport {
                message: format!("invalid subscription id: {}", id),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_404_maps_to_not_found() {
        let err: ScmError = AzureError::Api {
            status: 404,
            message: "TF401019: repository does not exist".to_string(),
        }
        .into();
        assert!(err.is_not_found());
    }

    #[test]
    fn other_api_statuses_map_to_transport() {
        let err: ScmError = AzureError::Api {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        match err {
            ScmError::Transport { message } => {
                assert!(message.contains("500"));
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn transport_failures_pass_through_unchanged() {
        let err: ScmError = AzureError::Http("connection refused".to_string()).into();
        assert!(matches!(err, ScmError::Transport { .. }));
        assert!(err.to_string().contains("connection refused"));
    }
}
