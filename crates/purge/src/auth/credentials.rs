//! Credential loading for X API access.

use crate::error::ConfigError;

use super::oauth::OAuth1Keys;

/// OAuth 1.0a consumer key.
pub const ENV_API_KEY: &str = "API_KEY";
/// OAuth 1.0a consumer secret.
pub const ENV_API_SECRET: &str = "API_SECRET";
/// OAuth 1.0a access token.
pub const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
/// OAuth 1.0a access token secret.
pub const ENV_ACCESS_SECRET: &str = "ACCESS_SECRET";
/// OAuth 2.0 user-context access token (alternative to the four keys above).
pub const ENV_BEARER_TOKEN: &str = "X_BEARER_TOKEN";

/// How requests are authorized.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// OAuth 1.0a user context, signed per request.
    OAuth1(OAuth1Keys),
    /// OAuth 2.0 user-context bearer token.
    Bearer(BearerToken),
}

/// An OAuth 2.0 access token that never prints.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub(crate) fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl Credentials {
    /// Load credentials from environment variables.
    ///
    /// # Environment Variables
    /// - `API_KEY`, `API_SECRET`, `ACCESS_TOKEN`, `ACCESS_SECRET`: OAuth 1.0a (preferred)
    /// - `X_BEARER_TOKEN`: OAuth 2.0 user-context token, used when the OAuth 1.0a set is absent
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let oauth1 = [ENV_API_KEY, ENV_API_SECRET, ENV_ACCESS_TOKEN, ENV_ACCESS_SECRET]
            .map(|name| (name, lookup(name)));

        if let [(_, Some(consumer_key)), (_, Some(consumer_secret)), (_, Some(access_token)), (_, Some(access_secret))] =
            oauth1.clone()
        {
            tracing::debug!("Using OAuth 1.0a user-context credentials");
            return Ok(Self::OAuth1(OAuth1Keys {
                consumer_key,
                consumer_secret,
                access_token,
                access_secret,
            }));
        }

        if let Some(token) = lookup(ENV_BEARER_TOKEN) {
            tracing::debug!("Using OAuth 2.0 bearer token");
            return Ok(Self::Bearer(BearerToken::new(token)));
        }

        let missing: Vec<&str> = oauth1
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        Err(ConfigError::MissingCredentials(format!(
            "{} (or {ENV_BEARER_TOKEN})",
            missing.join(", ")
        )))
    }

    /// Build the `Authorization` header value for a request.
    pub(crate) fn authorization(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        match self {
            Self::OAuth1(keys) => keys.authorization_header(method, url, params),
            Self::Bearer(token) => format!("Bearer {}", token.secret()),
        }
    }
}
