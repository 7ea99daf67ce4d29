//! User use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to any `UserRepository` implementation.
//!
//! # Invariants
//! - Every call maps to exactly one repository call with unchanged results.
//! - Service layer remains storage-agnostic.

use crate::model::user::{User, UserId};
use crate::repo::user_repo::{RepoResult, UserRepository};

/// Use-case service wrapper for user CRUD operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn find_all(&self) -> Vec<User> {
        self.repo.find_all()
    }

    pub fn find_user_by_id(&self, id: UserId) -> Option<User> {
        self.repo.find_by_id(id)
    }

    /// Returns the saved user, or `user` unchanged when the insert failed.
    pub fn save(&self, user: &User) -> User {
        self.repo.save(user)
    }

    pub fn update(&self, user: &User) {
        self.repo.update(user);
    }

    /// Deletes the row with `user.id()`. Returns whether a row was removed.
    pub fn delete(&self, user: &User) -> bool {
        self.repo.delete_by_id(user.id())
    }

    pub fn try_find_all(&self) -> RepoResult<Vec<User>> {
        self.repo.try_find_all()
    }

    pub fn try_find_user_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.repo.try_find_by_id(id)
    }

    pub fn try_save(&self, user: &User) -> RepoResult<User> {
        self.repo.try_save(user)
    }

    /// Returns `RepoError::NotFound` when no row has `user.id()`.
    pub fn try_update(&self, user: &User) -> RepoResult<()> {
        self.repo.try_update(user)
    }

    pub fn try_delete(&self, user: &User) -> RepoResult<bool> {
        self.repo.try_delete_by_id(user.id())
    }
}
