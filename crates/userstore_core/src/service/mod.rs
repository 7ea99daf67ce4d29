//! Core use-case services.
//!
//! # Responsibility
//! - Give callers entity-level operations without naming a repository type.
//! - Leave room for cross-cutting concerns on top of persistence.

pub mod user_service;
