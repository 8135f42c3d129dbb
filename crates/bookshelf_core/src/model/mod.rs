//! Catalog domain model.
//!
//! # Responsibility
//! - Define the data structures shared by storage and the request layer.
//!
//! # Invariants
//! - Every stored record is identified by a storage-assigned `BookId`.
//! - Records are never mutated in place; deletion is a hard delete.

pub mod book;
