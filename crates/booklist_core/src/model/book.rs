//! Book record model.
//!
//! # Responsibility
//! - Define the title/author record stored in the collection slot.
//! - Validate required fields before a record is persisted.
//!
//! # Invariants
//! - Serialized shape is exactly `{"title": ..., "author": ...}`.
//! - Validation checks emptiness only; whitespace is not trimmed, so an
//!   all-space value counts as filled.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One book entry in the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    /// Display title. Also used as the deletion key.
    pub title: String,
    /// Display author.
    pub author: String,
}

/// Field-level validation failures for [`Book`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be empty"),
            Self::EmptyAuthor => write!(f, "book author must not be empty"),
        }
    }
}

impl Error for BookValidationError {}

impl Book {
    /// Builds a book without validating it.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Validates required fields.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is the empty string.
    /// - `EmptyAuthor` when `author` is the empty string.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        Ok(())
    }

    /// Whether this book is keyed by `title` for removal.
    pub fn has_title(&self, title: &str) -> bool {
        self.title == title
    }
}
