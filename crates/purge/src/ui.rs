//! Console output for the purge CLI.

use colored::Colorize;

use crate::filter::FilterCriteria;
use crate::report::{DryRunReport, Outcome, RunReport};
use crate::twitter::Identity;

const RULE_WIDTH: usize = 50;

/// Print the tool banner.
pub fn print_banner() {
    println!("{}", "🧹 purge - X/Twitter post cleanup".cyan().bold());
    println!("{}", "=".repeat(RULE_WIDTH - 10).bright_black());
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
    println!("{}", "=".repeat(RULE_WIDTH).bright_black());
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Announce the resolved account.
pub fn print_identity(identity: &Identity) {
    print_success(&format!("Connected as {}", identity.at_handle()));
}

/// Describe the target selection before anything is fetched.
pub fn print_criteria(criteria: &FilterCriteria, dry_run: bool) {
    if dry_run {
        print_info("Dry run: nothing will be deleted");
    }
    if criteria.replies_only {
        print_info("Targeting replies only");
    }
    if let Some(before) = criteria.before {
        print_info(&format!(
            "Targeting posts created before {}",
            before.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if criteria.is_unrestricted() && !dry_run {
        print_warning("No filters given: EVERY post on the timeline will be deleted");
    }
}

/// Print whichever report the run produced.
pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Executed(report) => print_run_report(report),
        Outcome::DryRun(report) => print_dry_run_report(report),
    }
}

/// Print the dry-run summary.
pub fn print_dry_run_report(report: &DryRunReport) {
    print_section("📊 Dry run report");
    println!("   Fetched: {}", report.total_fetched);
    println!("   Replies: {}", report.replies);
    println!("   Normal posts: {}", report.normal);
    println!("   Would delete: {}", report.total_filtered.to_string().bold());

    if !report.preview.is_empty() {
        println!("\n   First {} replies:", report.preview.len());
        for item in &report.preview {
            println!(
                "     - {}: {}",
                item.id,
                item.created_at.to_rfc3339().bright_black()
            );
        }
    }

    print_collection_warning(report.collection_complete, report.collection_error.as_deref());
    println!();
    print_info("Run again without --dry-run to delete for real");
}

/// Print the completion summary.
pub fn print_run_report(report: &RunReport) {
    print_section("📊 Run complete");
    println!("   Fetched: {}", report.total_fetched);
    println!("   Targeted: {}", report.total_filtered);
    println!("   Deleted: {}", report.deleted.to_string().green());

    if report.failed > 0 {
        println!("   Failed: {}", report.failed.to_string().red());
        for failure in &report.failures {
            eprintln!("     - {}: {}", failure.id, failure.message);
        }
    }

    println!("   Time spent pacing: ~{} min", report.estimated_minutes());

    if report.interrupted {
        print_warning(&format!(
            "Interrupted: {} targets were not processed",
            report.remaining()
        ));
    }
    print_collection_warning(report.collection_complete, report.collection_error.as_deref());
}

fn print_collection_warning(complete: bool, error: Option<&str>) {
    if !complete {
        print_warning(&format!(
            "Timeline fetch stopped early ({}); run again to catch the rest",
            error.unwrap_or("unknown reason")
        ));
    }
}
