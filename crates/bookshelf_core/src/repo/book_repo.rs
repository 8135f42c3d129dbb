//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/read/delete and query APIs over the `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every user-supplied value is bound as a parameter, never spliced into SQL.
//! - Write paths call `NewBook::validate()` before SQL mutations.
//! - Read paths return rows as stored; the schema's NOT NULL columns are the
//!   only shape guarantee for rows written by other tools.
//! - "No such row" is an `Ok` value (`None`/`false`), never an error.

use crate::db::{DbError, FOLD_CASE_FN};
use crate::model::book::{Book, BookId, BookValidationError, NewBook};
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    description,
    genre
FROM books";

const LIKE_ESCAPE: char = '\\';

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalog operations.
pub trait BookRepository {
    /// Stores `book` and returns the record with its assigned id.
    fn insert_book(&self, book: &NewBook) -> RepoResult<Book>;
    /// Returns every stored book in storage order.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Returns books whose genre equals `genre` exactly.
    fn list_books_by_genre(&self, genre: &str) -> RepoResult<Vec<Book>>;
    /// Returns books whose title or author contains `keyword`, ignoring case.
    ///
    /// Case folding is Unicode-aware (`str::to_lowercase` on both sides).
    fn search_books(&self, keyword: &str) -> RepoResult<Vec<Book>>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Returns `false` when no row had that id.
    fn delete_book(&self, id: BookId) -> RepoResult<bool>;
}

/// SQLite-backed book repository over one borrowed connection.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_books(&self, sql: &str, params: impl Params) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn insert_book(&self, book: &NewBook) -> RepoResult<Book> {
        book.validate()?;

        self.conn.execute(
            "INSERT INTO books (
                title,
                author,
                genre,
                description
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.genre.as_str(),
                book.description.as_str(),
            ],
        )?;

        Ok(Book::from_new(self.conn.last_insert_rowid(), book.clone()))
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.query_books(&format!("{BOOK_SELECT_SQL};"), [])
    }

    fn list_books_by_genre(&self, genre: &str) -> RepoResult<Vec<Book>> {
        self.query_books(&format!("{BOOK_SELECT_SQL} WHERE genre = ?1;"), [genre])
    }

    fn search_books(&self, keyword: &str) -> RepoResult<Vec<Book>> {
        let pattern = like_contains_pattern(&keyword.to_lowercase());
        self.query_books(
            &format!(
                "{BOOK_SELECT_SQL}
                 WHERE {FOLD_CASE_FN}(title) LIKE ?1 ESCAPE '{LIKE_ESCAPE}'
                    OR {FOLD_CASE_FN}(author) LIKE ?1 ESCAPE '{LIKE_ESCAPE}';"
            ),
            [pattern],
        )
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

/// Wraps `keyword` as a `%...%` LIKE pattern with its wildcards escaped.
///
/// The keyword itself is always matched literally.
pub fn like_contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        description: row.get("description")?,
        genre: row.get("genre")?,
    })
}
