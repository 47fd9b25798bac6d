//! Purge pipeline - orchestrates the full authenticate-collect-filter-delete flow.

use tokio_util::sync::CancellationToken;

use crate::auth::authenticate;
use crate::collector::Collector;
use crate::config::RunConfig;
use crate::error::AuthError;
use crate::executor::DeletionExecutor;
use crate::filter::filter;
use crate::platform::Platform;
use crate::report::Outcome;
use crate::twitter::Identity;

/// Purge pipeline orchestrator.
pub struct Pipeline<'a> {
    config: RunConfig,
    platform: &'a dyn Platform,
    cancel: CancellationToken,
}

impl<'a> Pipeline<'a> {
    /// Create a new pipeline.
    #[must_use]
    pub fn new(config: RunConfig, platform: &'a dyn Platform, cancel: CancellationToken) -> Self {
        Self {
            config,
            platform,
            cancel,
        }
    }

    /// Resolve the acting account. Nothing else runs if this fails.
    pub async fn authenticate(&self) -> Result<Identity, AuthError> {
        authenticate(self.platform).await
    }

    /// Run a full purge for an authenticated account.
    pub async fn run_for(&self, identity: &Identity) -> Outcome {
        let collector = Collector::new(
            self.platform,
            self.config.collector_config(),
            self.cancel.clone(),
        );
        let collection = collector.collect(identity).await;
        if !collection.complete {
            tracing::warn!(
                fetched = collection.items.len(),
                reason = collection.error.as_deref().unwrap_or("unknown"),
                "Timeline fetch incomplete; older posts may not have been seen"
            );
        }

        let targets = filter(&collection.items, &self.config.criteria);
        tracing::info!(
            fetched = collection.items.len(),
            targets = targets.len(),
            replies_only = self.config.criteria.replies_only,
            before = ?self.config.criteria.before,
            "Applied filters"
        );

        let executor = DeletionExecutor::new(
            self.platform,
            self.config.executor_config(),
            self.cancel.clone(),
        );

        if self.config.dry_run {
            let mut report = executor.dry_run(&targets);
            report.total_fetched = collection.items.len();
            report.collection_complete = collection.complete;
            report.collection_error = collection.error;
            return Outcome::DryRun(report);
        }

        let mut report = executor.execute(&targets).await;
        report.total_fetched = collection.items.len();
        report.collection_complete = collection.complete;
        report.collection_error = collection.error;
        Outcome::Executed(report)
    }

    /// Authenticate, then run.
    pub async fn run(&self) -> Result<Outcome, AuthError> {
        let identity = self.authenticate().await?;
        Ok(self.run_for(&identity).await)
    }
}
