//! The narrow platform interface the pipeline depends on.

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::twitter::{Identity, Page};

/// Operations the purge pipeline needs from the social platform.
///
/// [`XClient`](crate::twitter::XClient) implements this against the X API;
/// tests substitute an in-memory fake.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Resolve the account the credentials belong to.
    async fn who_am_i(&self) -> Result<Identity, PlatformError>;

    /// Fetch one page of the user's timeline, newest first.
    async fn list_user_items(
        &self,
        user_id: &str,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<Page, PlatformError>;

    /// Delete a single item by ID.
    async fn delete_item(&self, item_id: &str) -> Result<(), PlatformError>;
}
