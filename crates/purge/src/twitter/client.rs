//! X API v2 client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::auth::Credentials;
use crate::error::PlatformError;
use crate::platform::Platform;

use super::types::{DeleteResponse, Identity, MeResponse, Page, TimelineResponse};

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/2";

/// Fields requested for every timeline item.
const TWEET_FIELDS: &str = "created_at,in_reply_to_user_id,author_id";

/// Page-size bounds accepted by the user timeline endpoint.
const MIN_RESULTS: usize = 5;
const MAX_RESULTS: usize = 100;

/// Authenticated client for the three endpoints the pipeline uses.
pub struct XClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl XClient {
    /// Create a client with a bounded per-request timeout.
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("purge/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            credentials,
            base_url: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, PlatformError> {
        let url = format!("{}{path}", self.base_url);
        let authorization = self.credentials.authorization(method.as_str(), &url, params);

        tracing::debug!(method = %method, url = %url, "Sending request");

        let response = self
            .client
            .request(method, &url)
            .query(params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = retry_after(response.headers());
            tracing::debug!(?retry_after_secs, url = %url, "Rate limited by X");
            return Err(PlatformError::RateLimited { retry_after_secs });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".into());

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PlatformError::Unauthorized(body),
            StatusCode::NOT_FOUND => PlatformError::NotFound(body),
            _ => PlatformError::Api {
                status: status.as_u16(),
                body,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PlatformError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Platform for XClient {
    async fn who_am_i(&self) -> Result<Identity, PlatformError> {
        let response = self.send(Method::GET, "/users/me", &[]).await?;
        let me: MeResponse = Self::decode(response).await?;
        Ok(me.into())
    }

    async fn list_user_items(
        &self,
        user_id: &str,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<Page, PlatformError> {
        let max_results = page_size.clamp(MIN_RESULTS, MAX_RESULTS).to_string();
        let mut params = vec![
            ("max_results", max_results.as_str()),
            ("tweet.fields", TWEET_FIELDS),
        ];
        if let Some(token) = cursor {
            params.push(("pagination_token", token));
        }

        let path = format!("/users/{}/tweets", urlencoding::encode(user_id));
        let response = self.send(Method::GET, &path, &params).await?;
        let timeline: TimelineResponse = Self::decode(response).await?;
        Ok(timeline.into())
    }

    async fn delete_item(&self, item_id: &str) -> Result<(), PlatformError> {
        let path = format!("/tweets/{}", urlencoding::encode(item_id));
        let response = self.send(Method::DELETE, &path, &[]).await?;
        let deleted: DeleteResponse = Self::decode(response).await?;

        if deleted.data.deleted {
            Ok(())
        } else {
            Err(PlatformError::Api {
                status: 200,
                body: format!("post {item_id} was not deleted"),
            })
        }
    }
}

/// Seconds to wait, from `retry-after` or the `x-rate-limit-reset` epoch.
fn retry_after(headers: &HeaderMap) -> Option<u64> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
    };

    if let Some(secs) = header("retry-after") {
        return u64::try_from(secs).ok();
    }

    header("x-rate-limit-reset").map(|reset| {
        let now = chrono::Utc::now().timestamp();
        u64::try_from(reset - now).unwrap_or(0)
    })
}
