//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for `User` entities.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Fallible `try_*` operations report every store failure distinctly.
//! - Legacy operations collapse failures to absent/empty/unchanged results
//!   and log them instead.

pub mod user_repo;
