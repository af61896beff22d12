//! Named string slots backing the book collection.
//!
//! # Responsibility
//! - Define the key-value contract the record store persists through.
//! - Provide an in-memory slot and a durable SQLite slot.
//!
//! # Invariants
//! - A key that was never written (or was cleared) reads as `None`.
//! - `write` replaces the whole value; there are no partial updates.
//! - Slot failures are environment conditions and are never retried here.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemorySlot;
pub use sqlite::SqliteSlot;

pub type SlotResult<T> = Result<T, SlotError>;

/// Failure to reach or mutate the persistence medium.
#[derive(Debug)]
pub enum SlotError {
    /// Storage is disabled or otherwise unreachable.
    Unavailable(String),
    /// The write would exceed the storage quota.
    QuotaExceeded {
        key: String,
        attempted_bytes: usize,
        quota_bytes: usize,
    },
    /// Durable backend failure.
    Db(DbError),
    /// The connection is missing the slot table.
    MissingRequiredTable(&'static str),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded {
                key,
                attempted_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {attempted_bytes} bytes > {quota_bytes} bytes"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SlotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-valued key-value storage surviving across sessions.
///
/// Methods take `&self`; implementations use interior mutability.
pub trait PersistenceSlot {
    /// Reads the value stored under `key`, `None` when unset.
    fn read(&self, key: &str) -> SlotResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> SlotResult<()>;
    /// Removes `key`. Clearing an unset key succeeds.
    fn clear(&self, key: &str) -> SlotResult<()>;
}

impl<S: PersistenceSlot + ?Sized> PersistenceSlot for &S {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> SlotResult<()> {
        (**self).write(key, value)
    }

    fn clear(&self, key: &str) -> SlotResult<()> {
        (**self).clear(key)
    }
}
