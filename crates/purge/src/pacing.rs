//! Sleeps that respect rate-limit hints and operator cancellation.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Longest platform hint honoured; X rate-limit windows are 15 minutes.
pub const MAX_HINTED_WAIT: Duration = Duration::from_secs(16 * 60);

/// How long to back off after a rate-limit signal.
///
/// The fixed wait applies unless the platform asked for longer.
#[must_use]
pub fn rate_limit_wait(fixed: Duration, retry_after_secs: Option<u64>) -> Duration {
    retry_after_secs
        .map(|secs| Duration::from_secs(secs).min(MAX_HINTED_WAIT))
        .map_or(fixed, |hinted| hinted.max(fixed))
}

/// Sleep for `duration` unless cancelled first. Returns `false` if cancelled.
pub async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> bool {
    if duration.is_zero() {
        return !cancel.is_cancelled();
    }
    tokio::select! {
        () = cancel.cancelled() => false,
        () = tokio::time::sleep(duration) => true,
    }
}

/// Consecutive rate-limit signals seen for one request, against an optional cap.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitBudget {
    max: Option<u32>,
    used: u32,
}

impl RateLimitBudget {
    #[must_use]
    pub fn new(max: Option<u32>) -> Self {
        Self { max, used: 0 }
    }

    /// Record one rate-limit signal. Returns `false` once the cap is exceeded.
    pub fn consume(&mut self) -> bool {
        self.used += 1;
        self.max.is_none_or(|max| self.used <= max)
    }

    #[must_use]
    pub fn used(&self) -> u32 {
        self.used
    }
}
