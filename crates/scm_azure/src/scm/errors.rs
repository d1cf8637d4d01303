use thiserror::Error;

/// Errors surfaced by SCM driver operations.
#[derive(Debug, Error)]
pub enum ScmError {
    /// The base URL handed to the driver at construction is malformed.
    #[error("invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// A required field was missing from an upstream payload.
    ///
    /// Converters are total over the nullable shape of provider responses:
    /// they either produce a fully populated canonical value or this error,
    /// never a partially initialized one.
    #[error("conversion error: missing required field {field}")]
    Conversion { field: &'static str },

    /// Webhook reconciliation found no subscription matching the given id.
    #[error("no webhook subscription {id} found for this repository")]
    HookNotFound { id: String },

    /// The resource does not exist upstream.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// The operation has no equivalent on this provider.
    ///
    /// Returned, never panicked, so callers can feature-detect with
    /// [`ScmError::is_not_supported`] instead of string-matching messages.
    #[error("operation not supported by this provider: {operation}")]
    NotSupported { operation: &'static str },

    /// Opaque upstream or network failure, passed through unchanged.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl ScmError {
    /// Create a conversion error for a missing required field.
    #[inline]
    pub fn conversion(field: &'static str) -> Self {
        Self::Conversion { field }
    }

    /// Create a hook-not-found error.
    #[inline]
    pub fn hook_not_found(id: impl Into<String>) -> Self {
        Self::HookNotFound { id: id.into() }
    }

    /// Create a not-found error.
    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a not-supported error.
    #[inline]
    pub fn not_supported(operation: &'static str) -> Self {
        Self::NotSupported { operation }
    }

    /// Create a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Check whether this error marks a capability the provider lacks.
    #[inline]
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }

    /// Check whether this error is an upstream 404.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for SCM driver operations.
pub type Result<T> = std::result::Result<T, ScmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_names_the_field() {
        let err = ScmError::conversion("repository.id");
        assert_eq!(
            err.to_string(),
            "conversion error: missing required field repository.id"
        );
    }

    #[test]
    fn not_supported_is_checkable_without_string_matching() {
        let err = ScmError::not_supported("git.find_tag");
        assert!(err.is_not_supported());
        assert!(!err.is_not_found());

        let err = ScmError::not_found("repository: demo");
        assert!(err.is_not_found());
        assert!(!err.is_not_supported());
    }

    #[test]
    fn hook_not_found_carries_the_requested_id() {
        let err = ScmError::hook_not_found("1234");
        assert!(err.to_string().contains("1234"));
        assert!(matches!(err, ScmError::HookNotFound { .. }));
    }
}
