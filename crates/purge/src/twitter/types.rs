//! Timeline data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deletable post on the user's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique post ID.
    pub id: String,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// Author of the post being replied to; present iff this is a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<String>,
    /// Post text, used for console previews only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Item {
    /// Create an item with the fields the pipeline needs.
    #[must_use]
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
            in_reply_to_user_id: None,
            text: None,
        }
    }

    /// Mark this item as a reply to the given user.
    #[must_use]
    pub fn replying_to(mut self, user_id: impl Into<String>) -> Self {
        self.in_reply_to_user_id = Some(user_id.into());
        self
    }

    /// Whether this item is a reply.
    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.in_reply_to_user_id.is_some()
    }

    /// Creation date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric user ID as a string.
    pub user_id: String,
    /// Handle (without @).
    pub handle: String,
}

impl Identity {
    /// Get the handle with @ prefix.
    #[must_use]
    pub fn at_handle(&self) -> String {
        format!("@{}", self.handle)
    }
}

/// One page of a user's timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Items on this page, in platform order.
    pub items: Vec<Item>,
    /// Cursor for the next page; `None` on the last page.
    pub next_cursor: Option<String>,
}

// =============================================================================
// X API v2 wire types
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct MeResponse {
    pub data: MeData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeData {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelineResponse {
    #[serde(default)]
    pub data: Vec<Item>,
    #[serde(default)]
    pub meta: Option<TimelineMeta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelineMeta {
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteResponse {
    pub data: DeleteData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteData {
    pub deleted: bool,
}

impl From<TimelineResponse> for Page {
    fn from(response: TimelineResponse) -> Self {
        Self {
            items: response.data,
            next_cursor: response.meta.and_then(|m| m.next_token),
        }
    }
}

impl From<MeResponse> for Identity {
    fn from(response: MeResponse) -> Self {
        Self {
            user_id: response.data.id,
            handle: response.data.username,
        }
    }
}
