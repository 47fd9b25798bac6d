//! Run configuration, validated before any network call.

use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;

use crate::collector::CollectorConfig;
use crate::error::ConfigError;
use crate::executor::ExecutorConfig;
use crate::filter::FilterCriteria;

/// Largest page the timeline endpoint serves.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on consecutive rate-limit retries for one request.
pub const DEFAULT_MAX_RATE_LIMIT_RETRIES: u32 = 30;

/// Everything one run needs, produced from invocation options.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Which items to target.
    pub criteria: FilterCriteria,
    /// Preview only; never delete.
    pub dry_run: bool,
    /// Timeline page size.
    pub page_size: usize,
    /// Consecutive rate-limit retries per request (`None` = unbounded).
    pub max_rate_limit_retries: Option<u32>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            dry_run: false,
            page_size: MAX_PAGE_SIZE,
            max_rate_limit_retries: Some(DEFAULT_MAX_RATE_LIMIT_RETRIES),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RunConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ConfigError::OutOfRange {
                name: "page size",
                reason: format!("{} is not within 1..={MAX_PAGE_SIZE}", self.page_size),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::OutOfRange {
                name: "timeout",
                reason: "must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    /// Collector settings for this run.
    #[must_use]
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            page_size: self.page_size,
            max_rate_limit_retries: self.max_rate_limit_retries,
            ..Default::default()
        }
    }

    /// Delete-loop settings for this run.
    #[must_use]
    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            max_rate_limit_retries: self.max_rate_limit_retries,
            ..Default::default()
        }
    }
}

/// Parse a `--before` value: `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_before_date(input: &str) -> Result<DateTime<Utc>, ConfigError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConfigError::InvalidDate(input.to_string()))
}
