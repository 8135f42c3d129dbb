//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog record persisted by the store.
//! - Separate insert payloads (no id yet) from stored records.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never changes afterwards.
//! - `title`, `author`, `genre` and `description` are checked for content
//!   when a book is inserted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned book identifier.
pub type BookId = i64;

/// Validation failure for book payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookValidationError {
    /// Named field is empty or whitespace-only.
    EmptyField(&'static str),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "book field `{field}` must not be empty"),
        }
    }
}

impl Error for BookValidationError {}

/// Insert payload: a book before storage has assigned its id.
///
/// Deserialization ignores any `id` sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            description: description.into(),
        }
    }

    /// Checks that every text field carries content.
    ///
    /// Fields are checked in column order, so the first empty one is reported.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        for (name, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(BookValidationError::EmptyField(name));
            }
        }
        Ok(())
    }
}

/// Stored catalog record.
///
/// Serialized as a flat object: `id`, `title`, `author`, `description`, `genre`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
}

impl Book {
    /// Builds the stored record for `payload` under the assigned `id`.
    pub fn from_new(id: BookId, payload: NewBook) -> Self {
        Self {
            id,
            title: payload.title,
            author: payload.author,
            description: payload.description,
            genre: payload.genre,
        }
    }
}
