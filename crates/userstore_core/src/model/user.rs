//! User domain model.
//!
//! # Responsibility
//! - Define the single entity persisted by the `users` table.
//! - Provide constructors for unsaved and loaded users.
//!
//! # Invariants
//! - `id == 0` means "not yet persisted"; the store assigns positive ids.
//! - `id` has no public setter; besides repository `save`, only the
//!   explicit constructors and serde deserialization choose an id, and
//!   repositories ignore a caller-chosen id on insert.
//! - `created_at` never changes after construction.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Store-assigned primary key of a user row.
pub type UserId = i64;

/// Id carried by users that have not been saved yet.
pub const UNSAVED_USER_ID: UserId = 0;

/// In-memory representation of one `users` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    /// Unix epoch milliseconds.
    created_at: i64,
}

impl User {
    /// Creates an unsaved user stamped with the current time.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(UNSAVED_USER_ID, name, email)
    }

    /// Creates a user with a known id, stamped with the current time.
    pub fn with_id(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::from_parts(id, name, email, now_epoch_ms())
    }

    /// Creates a user from every stored attribute.
    ///
    /// Used by row mapping and by callers that already know `created_at`.
    pub fn from_parts(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Creation time in Unix epoch milliseconds.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Returns whether the store has assigned an id to this user.
    pub fn is_persisted(&self) -> bool {
        self.id > UNSAVED_USER_ID
    }

    /// Returns a copy of this user carrying the store-generated `id`.
    pub(crate) fn persisted_as(&self, id: UserId) -> Self {
        Self {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

fn now_epoch_ms() -> i64 {
    // A clock before 1970 collapses to the epoch instead of panicking.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
