//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the catalog.
//! - Ensure the catalog schema exists before data is touched.
//!
//! # Invariants
//! - Core code must not read/write catalog data before `ensure_schema`
//!   succeeded at least once on the backing file.
//! - Per-operation connections never create a missing backing file.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;
pub mod schema;

pub use open::{connect_db, open_db, open_db_in_memory, FOLD_CASE_FN};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Backing file disappeared after the store was opened.
    MissingBackingFile(PathBuf),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingBackingFile(path) => {
                write!(f, "catalog database file `{}` does not exist", path.display())
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingBackingFile(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
