//! Loan (borrow) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::book::BookItem;

/// A book item borrowed by a patron. Active while `return_date` is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Loan {
    pub id: i32,
    pub book_item_id: i32,
    pub patron_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    /// Resolved from `book_item_id` at query time
    #[serde(skip)]
    pub book_item: Option<BookItem>,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.due_date < now
    }

    /// Title of the borrowed book when the item has been resolved
    pub fn book_title(&self) -> Option<String> {
        self.book_item
            .as_ref()
            .and_then(|item| item.book.as_ref())
            .map(|book| book.display_title())
    }
}
