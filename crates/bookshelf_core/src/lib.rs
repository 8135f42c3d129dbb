//! Core persistence and query layer for the bookshelf catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingStatus};
pub use model::book::{Book, BookId, BookValidationError, NewBook};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use store::CatalogStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
