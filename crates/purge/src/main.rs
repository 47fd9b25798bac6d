//! purge CLI - delete your own X/Twitter posts in bulk.
//!
//! # Environment Variables
//!
//! - `API_KEY`, `API_SECRET`, `ACCESS_TOKEN`, `ACCESS_SECRET` - OAuth 1.0a user context
//! - `X_BEARER_TOKEN` - OAuth 2.0 user-context token (used when the above are absent)
//!
//! A `.env` file in the working directory is loaded first.
//!
//! # Examples
//!
//! ```bash
//! # See what would be deleted
//! purge --dry-run
//!
//! # Delete replies older than 2024
//! purge --replies-only --before=2024-01-01
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use purge::config::{parse_before_date, RunConfig, MAX_PAGE_SIZE};
use purge::filter::FilterCriteria;
use purge::pipeline::Pipeline;
use purge::twitter::XClient;
use purge::{ui, Credentials};

/// Delete your own X/Twitter posts, optionally only replies or only older posts.
#[derive(Parser)]
#[command(name = "purge")]
#[command(about = "Bulk-delete your own X/Twitter posts")]
#[command(version)]
pub struct Cli {
    /// Show what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Only delete replies
    #[arg(long)]
    replies_only: bool,

    /// Only delete posts created before this date (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_name = "DATE", value_parser = parse_before)]
    before: Option<DateTime<Utc>>,

    /// Posts requested per timeline page
    #[arg(long, env = "PURGE_PAGE_SIZE", default_value_t = MAX_PAGE_SIZE)]
    page_size: usize,

    /// Consecutive rate-limit retries per request before giving up (0 = never give up)
    #[arg(long, env = "PURGE_MAX_RATE_LIMIT_RETRIES", default_value_t = 30)]
    max_rate_limit_retries: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "PURGE_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            criteria: FilterCriteria {
                replies_only: self.replies_only,
                before: self.before,
            },
            dry_run: self.dry_run,
            page_size: self.page_size,
            max_rate_limit_retries: (self.max_rate_limit_retries > 0)
                .then_some(self.max_rate_limit_retries),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn parse_before(value: &str) -> Result<DateTime<Utc>, purge::ConfigError> {
    parse_before_date(value)
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_error(&failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // Missing .env is fine; credentials may come from the real environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "purge=debug,info"
    } else {
        "purge=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = cli.run_config();
    config.validate()?;

    ui::print_banner();
    ui::print_criteria(&config.criteria, config.dry_run);

    let credentials = Credentials::from_env().context("Failed to load X credentials")?;
    let client = XClient::new(credentials, config.timeout).context("Failed to build HTTP client")?;

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    tracing::info!(
        dry_run = config.dry_run,
        replies_only = config.criteria.replies_only,
        before = ?config.criteria.before,
        page_size = config.page_size,
        "Starting purge"
    );

    let pipeline = Pipeline::new(config, &client, cancel);

    let identity = pipeline.authenticate().await?;
    ui::print_identity(&identity);

    let outcome = pipeline.run_for(&identity).await;
    ui::print_outcome(&outcome);

    Ok(())
}

/// The error followed by any causes its own message does not already include.
fn failure_message(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message = format!("{message}: {cause}");
        }
    }
    message
}

/// First Ctrl-C stops after the current request; a second one exits immediately.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        tracing::warn!("Interrupt received, finishing current request (Ctrl-C again to abort)");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}
