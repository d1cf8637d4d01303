//! Base-URL decomposition into routing identifiers.

use url::Url;

use crate::scm::ScmError;

/// Routing context derived once at client construction.
///
/// Azure DevOps addresses every call with an `{organization, project}`
/// pair taken from the base URL path. The resolved `base` is the URI
/// truncated to `<scheme>://<host>/<organization>/` and is what the
/// transport connects to; it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub organization: String,
    pub project: String,
    pub base: Url,
}

impl Endpoint {
    /// Parse a base URI of the form `https://host/organization/project`.
    ///
    /// A missing trailing slash is normalized away. Fewer than two
    /// non-empty path segments is an [`ScmError::InvalidEndpoint`].
    pub fn parse(uri: &str) -> Result<Self, ScmError> {
        let parsed = Url::parse(uri).map_err(|e| ScmError::InvalidEndpoint {
            url: uri.to_string(),
            reason: e.to_string(),
        })?;

        let segments: Vec<&str> = parsed
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() < 2 {
            return Err(ScmError::InvalidEndpoint {
                url: uri.to_string(),
                reason: "expected path /organization/project".to_string(),
            });
        }

        let organization = segments[0].to_string();
        let project = segments[1].to_string();

        let mut base = parsed.clone();
        base.set_path(&format!("/{}/", organization));
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self {
            organization,
            project,
            base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_organization_and_project() {
        let endpoint = Endpoint::parse("https://dev.azure.com/my-org/my-project")
            .expect("two-segment path should resolve");

        assert_eq!(endpoint.organization, "my-org");
        assert_eq!(endpoint.project, "my-project");
        assert_eq!(endpoint.base.as_str(), "https://dev.azure.com/my-org/");
    }

    #[test]
    fn parse_is_trailing_slash_insensitive() {
        let with = Endpoint::parse("https://dev.azure.com/org/proj/").expect("with slash");
        let without = Endpoint::parse("https://dev.azure.com/org/proj").expect("without slash");
        assert_eq!(with, without);
    }

    #[test]
    fn parse_ignores_extra_path_segments() {
        let endpoint = Endpoint::parse("https://dev.azure.com/org/proj/_git/repo")
            .expect("extra segments should be ignored");
        assert_eq!(endpoint.organization, "org");
        assert_eq!(endpoint.project, "proj");
        assert_eq!(endpoint.base.as_str(), "https://dev.azure.com/org/");
    }

    #[test]
    fn parse_strips_query_and_fragment_from_base() {
        let endpoint = Endpoint::parse("https://dev.azure.com/org/proj?a=1#top")
            .expect("query should not affect routing");
        assert_eq!(endpoint.base.as_str(), "https://dev.azure.com/org/");
    }

    #[test]
    fn parse_rejects_too_few_segments() {
        for uri in [
            "https://dev.azure.com",
            "https://dev.azure.com/",
            "https://dev.azure.com/only-org",
            "https://dev.azure.com/only-org/",
            "https://dev.azure.com//",
        ] {
            let err = Endpoint::parse(uri).expect_err("short path should fail");
            assert!(
                matches!(err, ScmError::InvalidEndpoint { .. }),
                "unexpected error for {uri}: {err:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_unparseable_uris() {
        let err = Endpoint::parse("not a url").expect_err("garbage should fail");
        assert!(matches!(err, ScmError::InvalidEndpoint { .. }));
    }
}
