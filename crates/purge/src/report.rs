//! Run summaries.

use std::time::Duration;

use crate::twitter::Item;

/// Replies shown in a dry-run preview.
pub const DRY_RUN_PREVIEW_LEN: usize = 5;

/// A target that could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    /// Item ID.
    pub id: String,
    /// Error detail.
    pub message: String,
}

/// Outcome of a deletion run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Items fetched from the timeline.
    pub total_fetched: usize,
    /// Items selected for deletion.
    pub total_filtered: usize,
    /// Items deleted.
    pub deleted: usize,
    /// Items that failed permanently.
    pub failed: usize,
    /// Whether the timeline fetch reached the last page.
    pub collection_complete: bool,
    /// Why the fetch stopped early, if it did.
    pub collection_error: Option<String>,
    /// Whether the operator interrupted the run.
    pub interrupted: bool,
    /// Per-item failure details.
    pub failures: Vec<DeleteFailure>,
    /// Pacing time spent on the deleted items.
    pub estimated_elapsed: Duration,
}

impl RunReport {
    /// Record a successful delete.
    pub fn record_deleted(&mut self) {
        self.deleted += 1;
    }

    /// Record a permanent failure for `id`.
    pub fn record_failed(&mut self, id: &str, message: String) {
        self.failed += 1;
        self.failures.push(DeleteFailure {
            id: id.to_string(),
            message,
        });
    }

    /// Targets neither deleted nor failed (only non-zero after an interruption).
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total_filtered
            .saturating_sub(self.deleted + self.failed)
    }

    /// Estimated elapsed time, rounded to whole minutes.
    #[must_use]
    pub fn estimated_minutes(&self) -> u64 {
        (self.estimated_elapsed.as_secs_f64() / 60.0).round() as u64
    }
}

/// What a real run would do, computed without deleting anything.
#[derive(Debug, Clone, Default)]
pub struct DryRunReport {
    /// Items fetched from the timeline.
    pub total_fetched: usize,
    /// Items that would be deleted.
    pub total_filtered: usize,
    /// Targets that are replies.
    pub replies: usize,
    /// Targets that are not replies.
    pub normal: usize,
    /// First few reply targets, for review.
    pub preview: Vec<Item>,
    /// Whether the timeline fetch reached the last page.
    pub collection_complete: bool,
    /// Why the fetch stopped early, if it did.
    pub collection_error: Option<String>,
}

impl DryRunReport {
    /// Summarize a target set.
    #[must_use]
    pub fn from_targets(targets: &[Item]) -> Self {
        let replies = targets.iter().filter(|item| item.is_reply()).count();
        Self {
            total_fetched: 0,
            total_filtered: targets.len(),
            replies,
            normal: targets.len() - replies,
            preview: targets
                .iter()
                .filter(|item| item.is_reply())
                .take(DRY_RUN_PREVIEW_LEN)
                .cloned()
                .collect(),
            collection_complete: true,
            collection_error: None,
        }
    }
}

/// Either report, depending on mode.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Items were deleted.
    Executed(RunReport),
    /// Nothing was deleted.
    DryRun(DryRunReport),
}
