//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from the store and request layers.
//!
//! # Invariants
//! - Repository writes must enforce `NewBook::validate()` before persistence.
//! - Missing rows are reported as values (`None`/`false`); only storage
//!   failures are errors.

pub mod book_repo;
