//! Book list use-case service.
//!
//! # Responsibility
//! - Validate user input before it reaches the record store.
//! - Provide list/add/remove entry points shared by presenter and FFI hosts.
//!
//! # Invariants
//! - Invalid input never causes a slot read or write.
//! - Service layer remains slot-agnostic.

use crate::model::book::{Book, BookValidationError};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for book list use-cases.
#[derive(Debug)]
pub enum BookServiceError {
    /// Required input missing.
    Validation(BookValidationError),
    /// Record store failure.
    Repo(RepoError),
}

impl Display for BookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl BookServiceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Repo(err) => err.error_code(),
        }
    }
}

impl From<BookValidationError> for BookServiceError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for BookServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Book list service facade over a record store.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists books in insertion order.
    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_all()
    }

    /// Validates and appends one book, returning the stored value.
    pub fn add_book(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Book, BookServiceError> {
        let book = Book::new(title, author);
        book.validate()?;
        self.repo.append(&book)?;
        Ok(book)
    }

    /// Removes every book carrying `title`. Unknown titles remove nothing.
    pub fn remove_books_by_title(&self, title: &str) -> RepoResult<usize> {
        self.repo.remove_by_title(title)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
