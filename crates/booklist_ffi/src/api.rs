//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list/add/remove book use-cases to Dart via FRB.
//! - Translate core outcomes into notification-ready response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - `kind` in responses is `success|danger`, matching core notification kinds.

use booklist_core::db::open_db;
use booklist_core::ui::notification::{MSG_BOOK_ADDED, MSG_BOOK_REMOVED, MSG_FILL_BOTH_FIELDS};
use booklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Book, BookListConfig, BookService, BookServiceError, NotificationKind, SlotBookRepository,
    SqliteSlot,
};
use log::error;
use std::sync::{Mutex, OnceLock};

static FFI_CONFIG: OnceLock<Result<BookListConfig, String>> = OnceLock::new();
// Serializes read-modify-write cycles when Dart calls from several isolates.
static BOOK_DB_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One book row for Dart rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookItem {
    pub title: String,
    pub author: String,
}

/// Book list envelope for startup rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListResponse {
    /// Books in insertion order (empty on failure).
    pub items: Vec<BookItem>,
    /// Whether the stored list could be read.
    pub ok: bool,
    /// Human-readable diagnostics message.
    pub message: String,
}

/// Action envelope carrying the notification Dart should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookActionResponse {
    /// Whether the mutation was applied.
    pub ok: bool,
    /// Notification kind (`success|danger`).
    pub kind: String,
    /// Notification text.
    pub message: String,
    /// Number of stored books removed (remove only).
    pub removed: u32,
}

impl BookActionResponse {
    fn success(message: impl Into<String>, removed: u32) -> Self {
        Self {
            ok: true,
            kind: NotificationKind::Success.as_str().to_string(),
            message: message.into(),
            removed,
        }
    }

    fn danger(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            kind: NotificationKind::Danger.as_str().to_string(),
            message: message.into(),
            removed: 0,
        }
    }
}

/// Lists stored books for initial rendering.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unreadable storage yields `ok=false` with no items; it is never
///   reported as an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn book_list() -> BookListResponse {
    list_response(with_book_service(|service| {
        service.list_books().map_err(BookServiceError::from)
    }))
}

/// Adds one book from the title/author form.
///
/// # FFI contract
/// - Empty title or author returns `ok=false` with the fill-in warning and
///   does not touch storage.
/// - Inputs are stored as given (no trimming).
#[flutter_rust_bridge::frb(sync)]
pub fn book_add(title: String, author: String) -> BookActionResponse {
    match with_book_service(|service| service.add_book(title, author)) {
        Ok(_) => BookActionResponse::success(MSG_BOOK_ADDED, 0),
        Err(FfiError::Service(BookServiceError::Validation(_))) => {
            BookActionResponse::danger(MSG_FILL_BOTH_FIELDS)
        }
        Err(err) => BookActionResponse::danger(format!("book_add failed: {err}")),
    }
}

/// Removes every stored book titled exactly `title`.
///
/// # FFI contract
/// - Unknown titles succeed with `removed=0`.
#[flutter_rust_bridge::frb(sync)]
pub fn book_remove(title: String) -> BookActionResponse {
    match with_book_service(|service| {
        service
            .remove_books_by_title(&title)
            .map_err(BookServiceError::from)
    }) {
        Ok(removed) => BookActionResponse::success(
            MSG_BOOK_REMOVED,
            u32::try_from(removed).unwrap_or(u32::MAX),
        ),
        Err(err) => BookActionResponse::danger(format!("book_remove failed: {err}")),
    }
}

#[derive(Debug)]
enum FfiError {
    Setup(String),
    Service(BookServiceError),
}

impl std::fmt::Display for FfiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup(message) => write!(f, "{message}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

fn resolve_config() -> Result<&'static BookListConfig, FfiError> {
    FFI_CONFIG
        .get_or_init(|| BookListConfig::from_env().map_err(|err| err.to_string()))
        .as_ref()
        .map_err(|err| FfiError::Setup(format!("config invalid: {err}")))
}

fn with_book_service<T>(
    f: impl FnOnce(&BookService<SlotBookRepository<SqliteSlot<'_>>>) -> Result<T, BookServiceError>,
) -> Result<T, FfiError> {
    let config = resolve_config()?;
    let _guard = BOOK_DB_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn = open_db(&config.db_path).map_err(|err| {
        error!("event=ffi_setup module=ffi status=error error_code=db_open_failed error={err}");
        FfiError::Setup(format!("book DB open failed: {err}"))
    })?;
    let slot = SqliteSlot::try_new(&conn).map_err(|err| {
        error!("event=ffi_setup module=ffi status=error error_code=slot_init_failed error={err}");
        FfiError::Setup(format!("book slot init failed: {err}"))
    })?;
    let service = BookService::new(SlotBookRepository::with_key(slot, config.slot_key.clone()));
    f(&service).map_err(FfiError::Service)
}

fn list_response(result: Result<Vec<Book>, FfiError>) -> BookListResponse {
    match result {
        Ok(books) => {
            let items: Vec<BookItem> = books.into_iter().map(to_book_item).collect();
            let message = format!("Loaded {} book(s).", items.len());
            BookListResponse {
                items,
                ok: true,
                message,
            }
        }
        Err(err) => BookListResponse {
            items: Vec::new(),
            ok: false,
            message: format!("book_list failed: {err}"),
        },
    }
}

fn to_book_item(book: Book) -> BookItem {
    BookItem {
        title: book.title,
        author: book.author,
    }
}
