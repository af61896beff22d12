//! Book record store backed by one persistence slot.
//!
//! # Responsibility
//! - Own reads and writes of the full book collection.
//! - Encode the collection as a JSON array of `{title, author}` objects.
//!
//! # Invariants
//! - Every mutation is one full read followed by one full write.
//! - An unset slot is an empty collection, never an error.
//! - Undecodable slot content fails the operation; it is never reset to empty.
//! - Insertion order is preserved across encode/decode.

use crate::model::book::{Book, BookValidationError};
use crate::slot::{PersistenceSlot, SlotError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when no override is configured.
pub const DEFAULT_SLOT_KEY: &str = "books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Record store failure.
#[derive(Debug)]
pub enum RepoError {
    /// Book rejected before persistence.
    Validation(BookValidationError),
    /// Persisted content is not a valid book collection.
    Decode { key: String, message: String },
    /// Collection could not be serialized.
    Encode(String),
    /// Slot could not be read or written.
    PersistenceUnavailable(SlotError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Decode { key, message } => {
                write!(f, "stored book list `{key}` is unreadable: {message}")
            }
            Self::Encode(message) => write!(f, "book list could not be encoded: {message}"),
            Self::PersistenceUnavailable(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::PersistenceUnavailable(err) => Some(err),
            Self::Decode { .. } | Self::Encode(_) => None,
        }
    }
}

impl RepoError {
    /// Stable code for metadata-only log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Decode { .. } => "decode_failed",
            Self::Encode(_) => "encode_failed",
            Self::PersistenceUnavailable(_) => "persistence_unavailable",
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SlotError> for RepoError {
    fn from(value: SlotError) -> Self {
        Self::PersistenceUnavailable(value)
    }
}

/// Record store contract.
pub trait BookRepository {
    /// Returns every stored book in insertion order.
    fn list_all(&self) -> RepoResult<Vec<Book>>;
    /// Appends one book at the end of the collection.
    fn append(&self, book: &Book) -> RepoResult<()>;
    /// Removes every book titled exactly `title`, returning how many went.
    fn remove_by_title(&self, title: &str) -> RepoResult<usize>;
}

/// Record store persisting the whole collection under one slot key.
pub struct SlotBookRepository<S: PersistenceSlot> {
    slot: S,
    key: String,
}

impl<S: PersistenceSlot> SlotBookRepository<S> {
    /// Binds the store to [`DEFAULT_SLOT_KEY`].
    pub fn new(slot: S) -> Self {
        Self::with_key(slot, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn store(&self, books: &[Book], op: &'static str) -> RepoResult<()> {
        let encoded = encode_books(books)?;
        if let Err(err) = self.slot.write(&self.key, &encoded) {
            error!(
                "event=book_{op} module=repo status=error error_code=slot_write_failed bytes={} error={err}",
                encoded.len()
            );
            return Err(err.into());
        }
        Ok(())
    }
}

impl<S: PersistenceSlot> BookRepository for SlotBookRepository<S> {
    fn list_all(&self) -> RepoResult<Vec<Book>> {
        let raw = match self.slot.read(&self.key) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=book_list module=repo status=error error_code=slot_read_failed error={err}"
                );
                return Err(err.into());
            }
        };

        let Some(raw) = raw else {
            debug!("event=book_list module=repo status=ok slot=unset count=0");
            return Ok(Vec::new());
        };

        match decode_books(&raw) {
            Ok(books) => {
                debug!("event=book_list module=repo status=ok count={}", books.len());
                Ok(books)
            }
            Err(RepoError::Decode { message, .. }) => {
                error!(
                    "event=book_list module=repo status=error error_code=decode_failed bytes={}",
                    raw.len()
                );
                Err(RepoError::Decode {
                    key: self.key.clone(),
                    message,
                })
            }
            Err(other) => Err(other),
        }
    }

    fn append(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        let mut books = self.list_all()?;
        books.push(book.clone());
        self.store(&books, "append")?;

        info!("event=book_append module=repo status=ok count={}", books.len());
        Ok(())
    }

    fn remove_by_title(&self, title: &str) -> RepoResult<usize> {
        let mut books = self.list_all()?;
        let before = books.len();
        books.retain(|book| !book.has_title(title));
        let removed = before - books.len();
        self.store(&books, "remove")?;

        info!(
            "event=book_remove module=repo status=ok removed={removed} count={}",
            books.len()
        );
        Ok(removed)
    }
}

/// Encodes a collection into its slot representation.
pub fn encode_books(books: &[Book]) -> RepoResult<String> {
    serde_json::to_string(books).map_err(|err| RepoError::Encode(err.to_string()))
}

/// Decodes slot content into a collection.
///
/// Entries are taken as stored: an empty title or author written by another
/// client still decodes, so `remove_by_title("")` can clean it up.
///
/// # Errors
/// - `Decode` when `raw` is not a JSON array of `{title, author}` objects.
pub fn decode_books(raw: &str) -> RepoResult<Vec<Book>> {
    let books: Vec<Book> = serde_json::from_str(raw).map_err(|err| RepoError::Decode {
        key: DEFAULT_SLOT_KEY.to_string(),
        message: err.to_string(),
    })?;

    Ok(books)
}
