use booklist_core::ui::notification::{MSG_BOOK_ADDED, MSG_BOOK_REMOVED, MSG_FILL_BOTH_FIELDS};
use booklist_core::{
    AddOutcome, Book, BookListPresenter, BookListView, BookRepository, BookService,
    BookValidationError, ClickTarget, DeleteIntent, DeleteOutcome, FormInput, ManualClock,
    MemorySlot, NotificationCenter, NotificationKind, SlotBookRepository, TableView,
};
use std::time::Duration;

type Presenter<'a> = BookListPresenter<SlotBookRepository<&'a MemorySlot>, TableView, ManualClock>;

fn presenter(slot: &MemorySlot) -> (ManualClock, Presenter<'_>) {
    let clock = ManualClock::new();
    let presenter = BookListPresenter::new(
        BookService::new(SlotBookRepository::new(slot)),
        TableView::new(),
        NotificationCenter::with_clock(clock.clone(), Duration::from_secs(3)),
    );
    (clock, presenter)
}

fn active_message<'a>(presenter: &'a Presenter<'_>) -> Option<(&'a str, NotificationKind)> {
    presenter
        .notifications()
        .active()
        .map(|notification| (notification.message.as_str(), notification.kind))
}

#[test]
fn render_all_shows_rows_in_insertion_order() {
    let slot = MemorySlot::new();
    slot.seed(
        "books",
        r#"[{"title":"Dune","author":"Herbert"},{"title":"Emma","author":"Austen"}]"#,
    );
    let (_clock, mut presenter) = presenter(&slot);

    assert_eq!(presenter.render_all().unwrap(), 2);
    let titles: Vec<_> = presenter
        .view()
        .rows()
        .iter()
        .map(|row| (row.title.as_str(), row.author.as_str()))
        .collect();
    assert_eq!(titles, vec![("Dune", "Herbert"), ("Emma", "Austen")]);
    assert!(presenter.notifications().active().is_none());
}

#[test]
fn render_all_on_unreadable_slot_reports_danger_and_renders_nothing() {
    let slot = MemorySlot::new();
    slot.seed("books", "{broken");
    let (_clock, mut presenter) = presenter(&slot);

    assert!(presenter.render_all().is_err());
    assert!(presenter.view().is_empty());
    let (message, kind) = active_message(&presenter).expect("error should be shown");
    assert!(message.starts_with("Could not load books"));
    assert_eq!(kind, NotificationKind::Danger);
}

#[test]
fn successful_submission_persists_renders_notifies_and_clears_form() {
    let slot = MemorySlot::new();
    let (_clock, mut presenter) = presenter(&slot);
    let mut form = FormInput::new("Dune", "Herbert");

    let outcome = presenter.handle_add_submission(&mut form);
    assert!(
        matches!(outcome, AddOutcome::Added(ref book) if *book == Book::new("Dune", "Herbert"))
    );

    assert!(form.is_empty());
    assert_eq!(presenter.view().len(), 1);
    assert_eq!(
        presenter.service().list_books().unwrap(),
        vec![Book::new("Dune", "Herbert")]
    );
    assert_eq!(
        active_message(&presenter),
        Some((MSG_BOOK_ADDED, NotificationKind::Success))
    );
}

#[test]
fn empty_field_submission_warns_without_state_change() {
    let slot = MemorySlot::new();
    let (_clock, mut presenter) = presenter(&slot);
    let mut form = FormInput::new("", "Herbert");

    let outcome = presenter.handle_add_submission(&mut form);
    assert!(matches!(
        outcome,
        AddOutcome::Rejected(BookValidationError::EmptyTitle)
    ));

    assert_eq!(form, FormInput::new("", "Herbert"));
    assert!(presenter.view().is_empty());
    assert_eq!(slot.raw("books"), None);
    assert_eq!(
        active_message(&presenter),
        Some((MSG_FILL_BOTH_FIELDS, NotificationKind::Danger))
    );
}

#[test]
fn whitespace_only_fields_count_as_filled() {
    let slot = MemorySlot::new();
    let (_clock, mut presenter) = presenter(&slot);
    let mut form = FormInput::new(" ", " ");

    assert!(matches!(
        presenter.handle_add_submission(&mut form),
        AddOutcome::Added(_)
    ));
    assert_eq!(presenter.view().len(), 1);
}

#[test]
fn storage_failure_on_submit_keeps_view_and_form() {
    let slot = MemorySlot::with_quota(16);
    let (_clock, mut presenter) = presenter(&slot);
    let mut form = FormInput::new("A title too long for the quota", "Someone");

    assert!(matches!(
        presenter.handle_add_submission(&mut form),
        AddOutcome::Failed(_)
    ));
    assert!(presenter.view().is_empty());
    assert_eq!(form.title, "A title too long for the quota");
    let (message, kind) = active_message(&presenter).expect("failure should be shown");
    assert!(message.starts_with("Could not save book"));
    assert_eq!(kind, NotificationKind::Danger);
}

#[test]
fn delete_click_removes_row_and_every_stored_match() {
    let slot = MemorySlot::new();
    let (_clock, mut presenter) = presenter(&slot);
    for (title, author) in [("Dune", "Herbert"), ("Emma", "Austen"), ("Dune", "Frank")] {
        presenter.handle_add_submission(&mut FormInput::new(title, author));
    }
    let first_row = presenter.view().row_at(0).unwrap();

    let outcome = presenter.handle_delete_intent(DeleteIntent::delete(first_row));
    match outcome {
        DeleteOutcome::Removed { title, removed } => {
            assert_eq!(title, "Dune");
            assert_eq!(removed, 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert_eq!(presenter.view().len(), 2);
    assert_eq!(
        presenter.service().repository().list_all().unwrap(),
        vec![Book::new("Emma", "Austen")]
    );
    assert_eq!(
        active_message(&presenter),
        Some((MSG_BOOK_REMOVED, NotificationKind::Success))
    );
}

#[test]
fn storage_failure_on_delete_keeps_row_and_reports_danger() {
    let slot = MemorySlot::new();
    let (_clock, mut presenter) = presenter(&slot);
    presenter.handle_add_submission(&mut FormInput::new("Dune", "Herbert"));
    let row = presenter.view().row_at(0).unwrap();
    slot.seed("books", "{broken");

    let outcome = presenter.handle_delete_intent(DeleteIntent::delete(row));
    assert!(matches!(outcome, DeleteOutcome::Failed(_)));

    assert_eq!(presenter.view().len(), 1);
    assert_eq!(presenter.view().row_title(row), Some("Dune"));
    assert_eq!(slot.raw("books").as_deref(), Some("{broken"));
    let (message, kind) = active_message(&presenter).expect("failure should be shown");
    assert!(message.starts_with("Could not remove book"));
    assert_eq!(kind, NotificationKind::Danger);
}

#[test]
fn clicks_outside_delete_action_are_ignored_silently() {
    let slot = MemorySlot::new();
    let (clock, mut presenter) = presenter(&slot);
    presenter.handle_add_submission(&mut FormInput::new("Dune", "Herbert"));
    clock.advance(Duration::from_secs(3));
    presenter.notifications_mut().expire_due();
    let row = presenter.view().row_at(0).unwrap();

    let outcome = presenter.handle_delete_intent(DeleteIntent {
        row,
        target: ClickTarget::Cell,
    });
    assert!(matches!(outcome, DeleteOutcome::Ignored));

    assert_eq!(presenter.view().len(), 1);
    assert_eq!(presenter.service().list_books().unwrap().len(), 1);
    assert!(presenter.notifications().active().is_none());
}

#[test]
fn readding_after_removal_creates_independent_row() {
    let slot = MemorySlot::new();
    let (_clock, mut presenter) = presenter(&slot);
    presenter.handle_add_submission(&mut FormInput::new("Dune", "Herbert"));
    let first = presenter.view().row_at(0).unwrap();
    presenter.handle_delete_intent(DeleteIntent::delete(first));

    presenter.handle_add_submission(&mut FormInput::new("Dune", "Herbert"));
    let second = presenter.view().row_at(0).unwrap();
    assert_ne!(first, second);

    assert!(matches!(
        presenter.handle_delete_intent(DeleteIntent::delete(first)),
        DeleteOutcome::Ignored
    ));
    assert_eq!(presenter.service().list_books().unwrap().len(), 1);
}

#[test]
fn notification_expires_after_three_seconds() {
    let slot = MemorySlot::new();
    let (clock, mut presenter) = presenter(&slot);
    assert_eq!(presenter.notifications().ttl(), Duration::from_secs(3));
    presenter.handle_add_submission(&mut FormInput::new("Dune", "Herbert"));

    clock.advance(Duration::from_millis(2_500));
    assert!(presenter.notifications_mut().expire_due().is_none());
    clock.advance(Duration::from_millis(500));
    assert!(presenter.notifications_mut().expire_due().is_some());
    assert!(presenter.notifications().active().is_none());
}
