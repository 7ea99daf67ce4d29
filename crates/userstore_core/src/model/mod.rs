//! Domain model for the user store.
//!
//! # Responsibility
//! - Define the canonical entity shared by repository and service layers.
//!
//! # Invariants
//! - A `User` loaded from storage always carries a positive id.
//! - Deletion removes the row; there are no tombstones.

pub mod user;
