//! Catalog store: the process-level handle over the backing file.
//!
//! # Responsibility
//! - Own the backing file path and its one-time bootstrap.
//! - Run each catalog operation on its own scoped connection.
//!
//! # Invariants
//! - A store value exists only after the file and schema were ensured.
//! - Connections never outlive the operation that opened them, on success
//!   or error paths alike.
//! - No in-memory caching: every call observes the file's current state.

use crate::db::{connect_db, open_db};
use crate::model::book::{Book, BookId, NewBook};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
use log::{debug, info, log, Level};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Explicitly constructed catalog handle.
///
/// Cloning is cheap and clones share the same backing file; concurrent
/// writers are serialized by SQLite's file locking.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Opens the catalog at `path`, creating the file and table if absent.
    ///
    /// # Errors
    /// - Returns `RepoError::Db` when the file cannot be created/opened or the
    ///   schema cannot be ensured.
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let store = Self { path: path.into() };
        store.initialize()?;
        Ok(store)
    }

    /// Re-runs the idempotent file/schema bootstrap.
    pub fn initialize(&self) -> RepoResult<()> {
        let conn = open_db(&self.path)?;
        drop(conn);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_repo<T>(
        &self,
        event: &str,
        op: impl FnOnce(&SqliteBookRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = connect_db(&self.path)
            .map_err(RepoError::from)
            .and_then(|conn| op(&SqliteBookRepository::new(&conn)));

        match &result {
            Ok(_) => debug!(
                "event={event} module=store status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log!(
                failure_level(err),
                "event={event} module=store status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}

// Rejected payloads are caller mistakes, not storage faults.
fn failure_level(err: &RepoError) -> Level {
    match err {
        RepoError::Validation(_) => Level::Warn,
        RepoError::Db(_) => Level::Error,
    }
}

impl BookRepository for CatalogStore {
    /// Precondition: all four fields are non-empty; violations are rejected
    /// with `RepoError::Validation` before storage is touched.
    fn insert_book(&self, book: &NewBook) -> RepoResult<Book> {
        let stored = self.with_repo("book_insert", |repo| repo.insert_book(book))?;
        info!("event=book_insert module=store status=ok id={}", stored.id);
        Ok(stored)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.with_repo("book_list", |repo| repo.list_books())
    }

    fn list_books_by_genre(&self, genre: &str) -> RepoResult<Vec<Book>> {
        self.with_repo("book_list_genre", |repo| repo.list_books_by_genre(genre))
    }

    fn search_books(&self, keyword: &str) -> RepoResult<Vec<Book>> {
        let books = self.with_repo("book_search", |repo| repo.search_books(keyword))?;
        debug!(
            "event=book_search module=store keyword_len={} hits={}",
            keyword.chars().count(),
            books.len()
        );
        Ok(books)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.with_repo("book_get", |repo| repo.get_book(id))
    }

    fn delete_book(&self, id: BookId) -> RepoResult<bool> {
        let found = self.with_repo("book_delete", |repo| repo.delete_book(id))?;
        info!("event=book_delete module=store status=ok id={id} found={found}");
        Ok(found)
    }
}
