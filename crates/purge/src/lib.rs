//! Bulk deletion of your own X/Twitter posts.
//!
//! This crate provides:
//! - Credential loading and OAuth 1.0a request signing
//! - Cursor-paginated timeline collection with rate-limit backoff
//! - Reply-only and before-date target filtering
//! - A paced, sequential delete loop with dry-run previews and a final report

pub mod auth;
pub mod collector;
pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod pacing;
pub mod pipeline;
pub mod platform;
pub mod report;
pub mod twitter;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use auth::{authenticate, Credentials};
pub use collector::{Collection, Collector, CollectorConfig};
pub use config::{parse_before_date, RunConfig};
pub use error::{AuthError, ConfigError, PlatformError};
pub use executor::{DeletionExecutor, ExecutorConfig};
pub use filter::{filter, FilterCriteria};
pub use pipeline::Pipeline;
pub use platform::Platform;
pub use report::{DryRunReport, Outcome, RunReport};
pub use twitter::{Identity, Item, Page, XClient};
