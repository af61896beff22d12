//! Book list presenter.
//!
//! # Responsibility
//! - Render the stored collection into a [`BookListView`].
//! - Turn add submissions and delete clicks into store calls plus view updates.
//! - Report every outcome through the [`NotificationCenter`].
//!
//! # Invariants
//! - The view changes only after the store accepted the mutation.
//! - Rejected or failed actions leave store, view and form untouched.
//! - Clicks outside a row's delete affordance are ignored silently.

use crate::model::book::{Book, BookValidationError};
use crate::repo::book_repo::BookRepository;
use crate::service::book_service::{BookService, BookServiceError};
use crate::ui::notification::{
    Clock, NotificationCenter, NotificationId, NotificationKind, SystemClock, MSG_BOOK_ADDED,
    MSG_BOOK_REMOVED, MSG_FILL_BOTH_FIELDS,
};
use crate::ui::view::{BookForm, BookListView, ClickTarget, DeleteIntent};
use log::{info, warn};

/// Result of an add submission.
#[derive(Debug)]
pub enum AddOutcome {
    Added(Book),
    Rejected(BookValidationError),
    Failed(BookServiceError),
}

/// Result of a row click.
#[derive(Debug)]
pub enum DeleteOutcome {
    Removed { title: String, removed: usize },
    Ignored,
    Failed(BookServiceError),
}

/// Presentation sync over one store, one view and one notification center.
pub struct BookListPresenter<R: BookRepository, V: BookListView, C: Clock = SystemClock> {
    service: BookService<R>,
    view: V,
    notifications: NotificationCenter<C>,
}

impl<R: BookRepository, V: BookListView, C: Clock> BookListPresenter<R, V, C> {
    pub fn new(service: BookService<R>, view: V, notifications: NotificationCenter<C>) -> Self {
        Self {
            service,
            view,
            notifications,
        }
    }

    /// Appends one row per stored book, in insertion order.
    ///
    /// Meant to run once at startup on an empty view.
    pub fn render_all(&mut self) -> Result<usize, BookServiceError> {
        let books = match self.service.list_books() {
            Ok(books) => books,
            Err(err) => {
                warn!(
                    "event=render_all module=ui status=error error_code={}",
                    err.error_code()
                );
                self.show_notification(
                    format!("Could not load books: {err}"),
                    NotificationKind::Danger,
                );
                return Err(err.into());
            }
        };

        for book in &books {
            self.view.append_row(book);
        }
        info!("event=render_all module=ui status=ok rows={}", books.len());
        Ok(books.len())
    }

    /// Handles a submit of the title/author form.
    pub fn handle_add_submission<F: BookForm>(&mut self, form: &mut F) -> AddOutcome {
        match self.service.add_book(form.title(), form.author()) {
            Ok(book) => {
                self.view.append_row(&book);
                self.show_notification(MSG_BOOK_ADDED, NotificationKind::Success);
                form.clear();
                AddOutcome::Added(book)
            }
            Err(BookServiceError::Validation(err)) => {
                info!("event=book_submit module=ui status=rejected reason={err}");
                self.show_notification(MSG_FILL_BOTH_FIELDS, NotificationKind::Danger);
                AddOutcome::Rejected(err)
            }
            Err(err) => {
                warn!(
                    "event=book_submit module=ui status=error error_code={}",
                    err.error_code()
                );
                self.show_notification(
                    format!("Could not save book: {err}"),
                    NotificationKind::Danger,
                );
                AddOutcome::Failed(err)
            }
        }
    }

    /// Handles a click inside the rendered list.
    pub fn handle_delete_intent(&mut self, intent: DeleteIntent) -> DeleteOutcome {
        if intent.target != ClickTarget::DeleteAction {
            return DeleteOutcome::Ignored;
        }
        let Some(title) = self.view.row_title(intent.row).map(str::to_owned) else {
            return DeleteOutcome::Ignored;
        };

        match self.service.remove_books_by_title(&title) {
            Ok(removed) => {
                self.view.remove_row(intent.row);
                self.show_notification(MSG_BOOK_REMOVED, NotificationKind::Success);
                DeleteOutcome::Removed { title, removed }
            }
            Err(err) => {
                warn!(
                    "event=book_delete module=ui status=error error_code={}",
                    err.error_code()
                );
                self.show_notification(
                    format!("Could not remove book: {err}"),
                    NotificationKind::Danger,
                );
                DeleteOutcome::Failed(err.into())
            }
        }
    }

    pub fn show_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationId {
        self.notifications.show(message, kind)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn notifications(&self) -> &NotificationCenter<C> {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter<C> {
        &mut self.notifications
    }

    pub fn service(&self) -> &BookService<R> {
        &self.service
    }
}
