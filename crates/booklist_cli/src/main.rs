//! Terminal front-end for the book list.
//!
//! # Responsibility
//! - Render the stored list as a numbered table on stdout.
//! - Route `add`/`remove` through the presenter so validation and
//!   notifications behave the same as in the app.

use booklist_core::db::open_db;
use booklist_core::{
    init_logging, AddOutcome, BookListConfig, BookListPresenter, BookService, DeleteIntent,
    DeleteOutcome, FormInput, NotificationCenter, NotificationKind, SlotBookRepository, SqliteSlot,
    SystemClock, TableView,
};
use clap::{Parser, Subcommand};
use log::info;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "booklist", version, about = "Keep a list of books")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every stored book.
    List,
    /// Add one book.
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
    },
    /// Delete the book shown at ROW of `list` (1-based), with every
    /// other book sharing its title.
    Remove { row: usize },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("booklist: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the requested action succeeded.
fn run(command: Command) -> Result<bool, String> {
    let config = BookListConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }

    let conn = open_db(&config.db_path).map_err(|err| format!("cannot open database: {err}"))?;
    let slot = SqliteSlot::try_new(&conn).map_err(|err| err.to_string())?;
    let service = BookService::new(SlotBookRepository::with_key(slot, config.slot_key.clone()));
    let notifications = NotificationCenter::with_clock(SystemClock, config.notification_ttl);
    let mut presenter = BookListPresenter::new(service, TableView::new(), notifications);

    info!("event=cli_command module=cli status=start command={}", command_name(&command));
    let loaded = presenter.render_all().is_ok();

    let ok = match command {
        Command::List => loaded,
        Command::Add { title, author } => {
            let mut form = FormInput::new(title, author);
            matches!(
                presenter.handle_add_submission(&mut form),
                AddOutcome::Added(_)
            )
        }
        Command::Remove { row } => {
            let target = row
                .checked_sub(1)
                .and_then(|index| presenter.view().row_at(index));
            match target {
                Some(row_id) => matches!(
                    presenter.handle_delete_intent(DeleteIntent::delete(row_id)),
                    DeleteOutcome::Removed { .. }
                ),
                None if loaded => {
                    presenter.show_notification(
                        format!("No book at row {row}."),
                        NotificationKind::Danger,
                    );
                    false
                }
                None => false,
            }
        }
    };

    print_table(presenter.view());
    if let Some(notification) = presenter.notifications().active() {
        println!("[{}] {}", notification.kind.as_str(), notification.message);
    }
    Ok(ok)
}

fn print_table(view: &TableView) {
    if view.is_empty() {
        println!("(no books)");
        return;
    }
    let title_width = column_width("Title", view.rows().iter().map(|row| row.title.as_str()));
    println!("{:>3}  {:<title_width$}  Author", "#", "Title");
    for (index, row) in view.rows().iter().enumerate() {
        println!("{:>3}  {:<title_width$}  {}", index + 1, row.title, row.author);
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|value| value.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List => "list",
        Command::Add { .. } => "add",
        Command::Remove { .. } => "remove",
    }
}
