//! X/Twitter API access.
//!
//! Provides the HTTP client and the timeline data types.

mod client;
mod types;

pub use client::{XClient, DEFAULT_API_BASE};
pub use types::{Identity, Item, Page};
