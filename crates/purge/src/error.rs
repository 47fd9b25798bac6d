//! Error types for platform access, authentication and configuration.

use thiserror::Error;

/// Errors returned by a [`Platform`](crate::platform::Platform) call.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Credentials were rejected (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the platform
    #[error("Rate limited{}", retry_hint(.retry_after_secs))]
    RateLimited {
        /// Seconds until the window resets, when the platform says so
        retry_after_secs: Option<u64>,
    },

    /// The item does not exist (already deleted or never visible)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Non-success status not covered above
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlatformError {
    /// Whether this error is a rate-limit signal that should be retried.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// The platform's retry hint, if this is a rate-limit error that carried one.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => *retry_after_secs,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Api {
                status: err.status().map_or(0, |s| s.as_u16()),
                body: format!("undecodable response: {err}"),
            }
        } else {
            Self::Http(err)
        }
    }
}

#[allow(clippy::ref_option)]
fn retry_hint(secs: &Option<u64>) -> String {
    secs.map(|s| format!(", retry after {s}s")).unwrap_or_default()
}

/// Identity resolution failed; the run must not proceed.
#[derive(Debug, Error)]
#[error("Authentication failed: {0}")]
pub struct AuthError(#[from] pub PlatformError);

/// Invalid invocation options or missing credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent
    #[error("Missing credentials: set {0}")]
    MissingCredentials(String),

    /// `--before` could not be parsed
    #[error("Invalid date '{0}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),

    /// A tuning value is out of range
    #[error("Invalid {name}: {reason}")]
    OutOfRange { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_display() {
        let hinted = PlatformError::RateLimited {
            retry_after_secs: Some(42),
        };
        assert_eq!(hinted.to_string(), "Rate limited, retry after 42s");

        let bare = PlatformError::RateLimited {
            retry_after_secs: None,
        };
        assert_eq!(bare.to_string(), "Rate limited");
        assert!(bare.is_rate_limited());
        assert_eq!(bare.retry_after_secs(), None);
    }

    #[test]
    fn test_other_errors_are_not_rate_limits() {
        assert!(!PlatformError::Timeout.is_rate_limited());
        assert!(!PlatformError::NotFound("1".into()).is_rate_limited());
        assert_eq!(PlatformError::Timeout.retry_after_secs(), None);
    }

    #[test]
    fn test_auth_error_wraps_platform_error() {
        let err = AuthError::from(PlatformError::Unauthorized("bad token".into()));
        assert_eq!(
            err.to_string(),
            "Authentication failed: Unauthorized: bad token"
        );
    }
}
