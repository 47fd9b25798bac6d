//! Target selection over the fetched timeline.

use chrono::{DateTime, Utc};

use crate::twitter::Item;

/// Which fetched items become deletion targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Keep only replies.
    pub replies_only: bool,
    /// Keep only items created strictly before this instant.
    pub before: Option<DateTime<Utc>>,
}

impl FilterCriteria {
    /// True when no criterion is set and every item would be targeted.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        !self.replies_only && self.before.is_none()
    }

    /// Whether a single item passes every configured criterion.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        if self.replies_only && !item.is_reply() {
            return false;
        }
        if let Some(before) = self.before {
            if item.created_at >= before {
                return false;
            }
        }
        true
    }
}

/// Select the items matching `criteria`, preserving order.
#[must_use]
pub fn filter(items: &[Item], criteria: &FilterCriteria) -> Vec<Item> {
    items
        .iter()
        .filter(|item| criteria.matches(item))
        .cloned()
        .collect()
}
