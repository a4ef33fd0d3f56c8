//! Friends list, kept only on this device.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LinkupError, LinkupResult};
use crate::store::{Friends, LocalStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub handle: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
}

impl Friend {
    /// Single letter used as the friend's avatar.
    pub fn initial(&self) -> char {
        self.handle
            .chars()
            .nth(1)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

/// Friends list operations on top of the local store.
pub struct FriendBook<'a> {
    store: &'a LocalStore,
}

impl<'a> FriendBook<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        FriendBook { store }
    }

    pub fn list(&self) -> Vec<Friend> {
        self.store.get::<Friends>()
    }

    /// Add a friend by handle. Handles must start with `@` and are unique ignoring case.
    pub fn add(&self, handle: &str, now: DateTime<Utc>) -> LinkupResult<Friend> {
        let handle = handle.trim();
        if !handle.starts_with('@') || handle.len() < 2 {
            return Err(LinkupError::validation(
                "Handle should start with @ (e.g., @ahmed)",
            ));
        }

        let mut friends = self.list();
        if friends.iter().any(|f| same_handle(&f.handle, handle)) {
            return Err(LinkupError::validation("Already added."));
        }

        let friend = Friend {
            handle: handle.to_string(),
            added_at: now,
        };
        friends.push(friend.clone());
        self.store.set::<Friends>(&friends)?;
        Ok(friend)
    }

    /// Remove the friend with this handle (ignoring case). Returns the removed entry.
    pub fn remove(&self, handle: &str) -> LinkupResult<Option<Friend>> {
        let mut friends = self.list();
        let Some(pos) = friends.iter().position(|f| same_handle(&f.handle, handle.trim())) else {
            return Ok(None);
        };
        let removed = friends.remove(pos);
        self.store.set::<Friends>(&friends)?;
        Ok(Some(removed))
    }
}

fn same_handle(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
