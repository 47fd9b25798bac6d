//! Sequential deletion with pacing and rate-limit recovery.

use rand::Rng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::PlatformError;
use crate::pacing::{rate_limit_wait, sleep_or_cancel, RateLimitBudget};
use crate::platform::Platform;
use crate::report::{DryRunReport, RunReport};
use crate::twitter::Item;

/// Configuration for the delete loop.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Lower bound of the pause after each successful delete.
    pub min_item_delay: Duration,
    /// Upper bound of the pause after each successful delete.
    pub max_item_delay: Duration,
    /// Pause after a rate-limit signal before retrying the same item.
    pub rate_limit_wait: Duration,
    /// Consecutive rate limits tolerated on one item (`None` = unbounded).
    pub max_rate_limit_retries: Option<u32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            min_item_delay: Duration::from_secs(2),
            max_item_delay: Duration::from_secs(4),
            rate_limit_wait: Duration::from_secs(120),
            max_rate_limit_retries: Some(30),
        }
    }
}

impl ExecutorConfig {
    /// Midpoint of the pacing range, used for elapsed-time estimates.
    #[must_use]
    pub fn mean_item_delay(&self) -> Duration {
        (self.min_item_delay + self.max_item_delay) / 2
    }

    fn jittered_delay(&self) -> Duration {
        if self.max_item_delay <= self.min_item_delay {
            return self.min_item_delay;
        }
        rand::rng().random_range(self.min_item_delay..=self.max_item_delay)
    }
}

/// Terminal state of one target.
#[derive(Debug)]
enum ItemOutcome {
    Deleted,
    Failed(PlatformError),
    RetriesExhausted(u32),
    Interrupted,
}

/// Deletes targets one at a time.
pub struct DeletionExecutor<'a> {
    platform: &'a dyn Platform,
    config: ExecutorConfig,
    cancel: CancellationToken,
}

impl<'a> DeletionExecutor<'a> {
    /// Create an executor over the given platform.
    #[must_use]
    pub fn new(platform: &'a dyn Platform, config: ExecutorConfig, cancel: CancellationToken) -> Self {
        Self {
            platform,
            config,
            cancel,
        }
    }

    /// Summarize what would be deleted. Never calls the platform.
    #[must_use]
    pub fn dry_run(&self, targets: &[Item]) -> DryRunReport {
        let report = DryRunReport::from_targets(targets);
        tracing::info!(
            targets = report.total_filtered,
            replies = report.replies,
            normal = report.normal,
            "Dry run, nothing deleted"
        );
        report
    }

    /// Delete every target in order.
    ///
    /// A failing item is recorded and skipped; rate limits are waited out and
    /// the same item retried. Returns early only when cancelled.
    pub async fn execute(&self, targets: &[Item]) -> RunReport {
        let total = targets.len();
        let mut report = RunReport {
            total_filtered: total,
            ..Default::default()
        };

        tracing::info!(targets = total, "Starting deletion");

        for item in targets {
            if self.cancel.is_cancelled() {
                report.interrupted = true;
                break;
            }

            match self.delete_one(item).await {
                ItemOutcome::Deleted => {
                    report.record_deleted();
                    tracing::info!(
                        id = %item.id,
                        date = %item.date(),
                        progress = %format!("{}/{total}", report.deleted),
                        "Deleted"
                    );

                    let delay = self.config.jittered_delay();
                    if !sleep_or_cancel(delay, &self.cancel).await {
                        report.interrupted = true;
                        break;
                    }
                }
                ItemOutcome::Failed(e) => {
                    tracing::error!(
                        phase = "delete",
                        id = %item.id,
                        error = %e,
                        progress = %format!("{}/{total}", report.deleted),
                        "Delete failed"
                    );
                    report.record_failed(&item.id, e.to_string());
                }
                ItemOutcome::RetriesExhausted(attempts) => {
                    tracing::error!(
                        phase = "delete",
                        id = %item.id,
                        attempts,
                        "Rate limit retries exhausted"
                    );
                    report.record_failed(
                        &item.id,
                        format!("rate limited {attempts} times in a row"),
                    );
                }
                ItemOutcome::Interrupted => {
                    report.interrupted = true;
                    break;
                }
            }
        }

        report.estimated_elapsed = self.config.mean_item_delay() * report.deleted as u32;

        tracing::info!(
            deleted = report.deleted,
            failed = report.failed,
            remaining = report.remaining(),
            interrupted = report.interrupted,
            "Deletion finished"
        );

        report
    }

    /// Drive one item from pending to deleted or failed.
    async fn delete_one(&self, item: &Item) -> ItemOutcome {
        let mut budget = RateLimitBudget::new(self.config.max_rate_limit_retries);

        loop {
            match self.platform.delete_item(&item.id).await {
                Ok(()) => return ItemOutcome::Deleted,
                Err(e) if e.is_rate_limited() => {
                    if !budget.consume() {
                        return ItemOutcome::RetriesExhausted(budget.used());
                    }

                    let wait = rate_limit_wait(self.config.rate_limit_wait, e.retry_after_secs());
                    tracing::warn!(
                        phase = "delete",
                        id = %item.id,
                        wait_secs = wait.as_secs(),
                        attempt = budget.used(),
                        "Rate limited, waiting before retrying item"
                    );
                    if !sleep_or_cancel(wait, &self.cancel).await {
                        return ItemOutcome::Interrupted;
                    }
                }
                Err(e) => return ItemOutcome::Failed(e),
            }
        }
    }
}
