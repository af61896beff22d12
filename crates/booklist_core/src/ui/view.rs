//! View and input surfaces.

use crate::model::book::Book;

/// Handle of one rendered row, stable for the row lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// Tabular list container the presenter renders into.
pub trait BookListView {
    /// Appends one row showing `book` and returns its handle.
    fn append_row(&mut self, book: &Book) -> RowId;
    /// Removes the row; `false` when the handle is unknown.
    fn remove_row(&mut self, row: RowId) -> bool;
    /// Title text displayed by the row.
    fn row_title(&self, row: RowId) -> Option<&str>;
}

/// Part of a row the user activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The row's delete affordance.
    DeleteAction,
    /// Any other cell or element.
    Cell,
}

/// Click on a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteIntent {
    pub row: RowId,
    pub target: ClickTarget,
}

impl DeleteIntent {
    /// Click on the delete affordance of `row`.
    pub fn delete(row: RowId) -> Self {
        Self {
            row,
            target: ClickTarget::DeleteAction,
        }
    }
}

/// Title/author input fields.
pub trait BookForm {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    /// Empties both fields.
    fn clear(&mut self);
}

/// Plain owned form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub author: String,
}

impl FormInput {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty()
    }
}

impl BookForm for FormInput {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn clear(&mut self) {
        self.title.clear();
        self.author.clear();
    }
}

/// One rendered row of a [`TableView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: RowId,
    pub title: String,
    pub author: String,
}

/// In-memory ordered table.
#[derive(Debug, Default)]
pub struct TableView {
    rows: Vec<TableRow>,
    next_id: u64,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Handle of the row at `index` in display order.
    pub fn row_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(|row| row.id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl BookListView for TableView {
    fn append_row(&mut self, book: &Book) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(TableRow {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
        });
        id
    }

    fn remove_row(&mut self, row: RowId) -> bool {
        match self.rows.iter().position(|current| current.id == row) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    fn row_title(&self, row: RowId) -> Option<&str> {
        self.rows
            .iter()
            .find(|current| current.id == row)
            .map(|current| current.title.as_str())
    }
}
