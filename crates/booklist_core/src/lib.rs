//! Core domain logic for the book list.
//! This crate is the single source of truth for the stored collection.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod slot;
pub mod ui;

pub use config::{BookListConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookValidationError};
pub use repo::book_repo::{
    decode_books, encode_books, BookRepository, RepoError, RepoResult, SlotBookRepository,
    DEFAULT_SLOT_KEY,
};
pub use service::book_service::{BookService, BookServiceError};
pub use slot::{MemorySlot, PersistenceSlot, SlotError, SlotResult, SqliteSlot};
pub use ui::notification::{
    Clock, ManualClock, Notification, NotificationCenter, NotificationId, NotificationKind,
    SystemClock,
};
pub use ui::presenter::{AddOutcome, BookListPresenter, DeleteOutcome};
pub use ui::view::{
    BookForm, BookListView, ClickTarget, DeleteIntent, FormInput, RowId, TableRow, TableView,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
