//! In-memory [`Platform`] for unit tests.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::error::PlatformError;
use crate::platform::Platform;
use crate::twitter::{Identity, Item, Page};

/// Timeline served in offset-cursor pages, with scripted failures.
pub(crate) struct FakePlatform {
    items: Vec<Item>,
    auth_error: Mutex<Option<PlatformError>>,
    list_errors: Mutex<HashMap<usize, VecDeque<PlatformError>>>,
    delete_rate_limits: Mutex<HashMap<String, usize>>,
    delete_failures: HashSet<String>,
    who_am_i_calls: Mutex<usize>,
    list_cursors: Mutex<Vec<Option<String>>>,
    delete_attempts: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub(crate) fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            auth_error: Mutex::new(None),
            list_errors: Mutex::new(HashMap::new()),
            delete_rate_limits: Mutex::new(HashMap::new()),
            delete_failures: HashSet::new(),
            who_am_i_calls: Mutex::new(0),
            list_cursors: Mutex::new(Vec::new()),
            delete_attempts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_auth_error(self, error: PlatformError) -> Self {
        *self.auth_error.lock().unwrap() = Some(error);
        self
    }

    /// Fail the `call`-th (0-based) list request with `error`.
    pub(crate) fn with_list_error(self, call: usize, error: PlatformError) -> Self {
        self.list_errors
            .lock()
            .unwrap()
            .entry(call)
            .or_default()
            .push_back(error);
        self
    }

    /// Rate-limit the first `times` delete attempts for `id`.
    pub(crate) fn with_delete_rate_limit(self, id: &str, times: usize) -> Self {
        self.delete_rate_limits
            .lock()
            .unwrap()
            .insert(id.to_string(), times);
        self
    }

    /// Every delete of `id` fails with a server error.
    pub(crate) fn with_delete_failure(mut self, id: &str) -> Self {
        self.delete_failures.insert(id.to_string());
        self
    }

    pub(crate) fn who_am_i_calls(&self) -> usize {
        *self.who_am_i_calls.lock().unwrap()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_cursors.lock().unwrap().len()
    }

    pub(crate) fn list_cursors(&self) -> Vec<Option<String>> {
        self.list_cursors.lock().unwrap().clone()
    }

    pub(crate) fn delete_attempts(&self) -> Vec<String> {
        self.delete_attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn who_am_i(&self) -> Result<Identity, PlatformError> {
        *self.who_am_i_calls.lock().unwrap() += 1;
        if let Some(error) = self.auth_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(Identity {
            user_id: "42".to_string(),
            handle: "tester".to_string(),
        })
    }

    async fn list_user_items(
        &self,
        _user_id: &str,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<Page, PlatformError> {
        let call = {
            let mut cursors = self.list_cursors.lock().unwrap();
            cursors.push(cursor.map(str::to_string));
            cursors.len() - 1
        };

        if let Some(error) = self
            .list_errors
            .lock()
            .unwrap()
            .get_mut(&call)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }

        let start: usize = cursor.map_or(0, |c| c.parse().unwrap());
        let end = (start + page_size).min(self.items.len());
        Ok(Page {
            items: self.items[start..end].to_vec(),
            next_cursor: (end < self.items.len()).then(|| end.to_string()),
        })
    }

    async fn delete_item(&self, item_id: &str) -> Result<(), PlatformError> {
        self.delete_attempts
            .lock()
            .unwrap()
            .push(item_id.to_string());

        if let Some(remaining) = self.delete_rate_limits.lock().unwrap().get_mut(item_id) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(PlatformError::RateLimited {
                    retry_after_secs: None,
                });
            }
        }

        if self.delete_failures.contains(item_id) {
            return Err(PlatformError::Api {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(())
    }
}

/// `count` items, one day apart starting 2024-01-01, every third one a reply.
pub(crate) fn sample_items(count: usize) -> Vec<Item> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let item = Item::new(format!("{i}"), start + Duration::days(i as i64));
            if i % 3 == 0 {
                item.replying_to("u1")
            } else {
                item
            }
        })
        .collect()
}
