//! Timeline collection via cursor pagination.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::pacing::{rate_limit_wait, sleep_or_cancel, RateLimitBudget};
use crate::platform::Platform;
use crate::twitter::{Identity, Item};

/// Configuration for timeline collection.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Items requested per page.
    pub page_size: usize,
    /// Pause between successful page requests.
    pub page_delay: Duration,
    /// Pause after a rate-limit signal before retrying the same page.
    pub rate_limit_wait: Duration,
    /// Consecutive rate limits tolerated on one page (`None` = unbounded).
    pub max_rate_limit_retries: Option<u32>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_delay: Duration::from_millis(100),
            rate_limit_wait: Duration::from_secs(60),
            max_rate_limit_retries: Some(30),
        }
    }
}

/// Everything gathered by one collection pass.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Items in platform order (newest first).
    pub items: Vec<Item>,
    /// False when collection stopped before the last page.
    pub complete: bool,
    /// Why collection stopped early, if it did.
    pub error: Option<String>,
}

/// Walks a user's timeline page by page.
pub struct Collector<'a> {
    platform: &'a dyn Platform,
    config: CollectorConfig,
    cancel: CancellationToken,
}

impl<'a> Collector<'a> {
    /// Create a collector over the given platform.
    #[must_use]
    pub fn new(platform: &'a dyn Platform, config: CollectorConfig, cancel: CancellationToken) -> Self {
        Self {
            platform,
            config,
            cancel,
        }
    }

    /// Fetch every item on the user's timeline.
    ///
    /// Rate limits are waited out and the same page retried. Any other error
    /// ends collection and returns what was gathered so far, marked incomplete.
    pub async fn collect(&self, identity: &Identity) -> Collection {
        let mut items: Vec<Item> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut budget = RateLimitBudget::new(self.config.max_rate_limit_retries);

        tracing::info!(
            user_id = %identity.user_id,
            page_size = self.config.page_size,
            "Fetching timeline"
        );

        loop {
            if self.cancel.is_cancelled() {
                return Self::incomplete(items, "interrupted".to_string());
            }

            let result = self
                .platform
                .list_user_items(&identity.user_id, cursor.as_deref(), self.config.page_size)
                .await;

            match result {
                Ok(page) => {
                    budget = RateLimitBudget::new(self.config.max_rate_limit_retries);
                    items.extend(page.items);
                    tracing::info!(total = items.len(), "Fetched page");

                    let Some(next) = page.next_cursor else {
                        break;
                    };
                    cursor = Some(next);

                    if !sleep_or_cancel(self.config.page_delay, &self.cancel).await {
                        return Self::incomplete(items, "interrupted".to_string());
                    }
                }
                Err(e) if e.is_rate_limited() => {
                    if !budget.consume() {
                        tracing::warn!(
                            phase = "fetch",
                            attempts = budget.used(),
                            fetched = items.len(),
                            "Rate limit retries exhausted, stopping collection"
                        );
                        return Self::incomplete(
                            items,
                            format!("rate limited {} times in a row", budget.used()),
                        );
                    }

                    let wait = rate_limit_wait(self.config.rate_limit_wait, e.retry_after_secs());
                    tracing::warn!(
                        phase = "fetch",
                        wait_secs = wait.as_secs(),
                        attempt = budget.used(),
                        "Rate limited, waiting before retrying page"
                    );
                    if !sleep_or_cancel(wait, &self.cancel).await {
                        return Self::incomplete(items, "interrupted".to_string());
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        phase = "fetch",
                        error = %e,
                        fetched = items.len(),
                        "Timeline fetch failed, continuing with partial results"
                    );
                    return Self::incomplete(items, e.to_string());
                }
            }
        }

        tracing::info!(total = items.len(), "Timeline fetch complete");
        Collection {
            items,
            complete: true,
            error: None,
        }
    }

    fn incomplete(items: Vec<Item>, reason: String) -> Collection {
        Collection {
            items,
            complete: false,
            error: Some(reason),
        }
    }
}
