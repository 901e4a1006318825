//! In-memory data store backed by flat JSON files
//!
//! Every collection is read once at startup. Lookups run against the in-memory
//! vectors; mutations replace a record in place and the owning repository asks
//! the store to rewrite the matching file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{Author, Book, BookItem, Loan, Patron},
};

const AUTHORS_FILE: &str = "Authors.json";
const BOOKS_FILE: &str = "Books.json";
const BOOK_ITEMS_FILE: &str = "BookItems.json";
const PATRONS_FILE: &str = "Patrons.json";
const LOANS_FILE: &str = "Loans.json";

/// Store handle shared by all repositories
pub type SharedStore = Arc<RwLock<DataStore>>;

#[derive(Debug, Default)]
pub struct DataStore {
    /// `None` for stores that are not backed by files
    dir: Option<PathBuf>,
    authors: Vec<Author>,
    books: Vec<Book>,
    book_items: Vec<BookItem>,
    patrons: Vec<Patron>,
    loans: Vec<Loan>,
}

impl DataStore {
    /// Load every collection from `dir`
    pub async fn load(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();

        let store = Self {
            authors: read_collection(&dir.join(AUTHORS_FILE), false).await?,
            books: read_collection(&dir.join(BOOKS_FILE), true).await?,
            book_items: read_collection(&dir.join(BOOK_ITEMS_FILE), true).await?,
            patrons: read_collection(&dir.join(PATRONS_FILE), true).await?,
            loans: read_collection(&dir.join(LOANS_FILE), true).await?,
            dir: Some(dir),
        };

        tracing::info!(
            "Loaded {} patrons, {} books, {} book items, {} loans from {}",
            store.patrons.len(),
            store.books.len(),
            store.book_items.len(),
            store.loans.len(),
            store.dir.as_deref().unwrap_or(Path::new("")).display()
        );

        Ok(store)
    }

    /// Build a store with no backing files; saves are no-ops
    pub fn in_memory(
        authors: Vec<Author>,
        books: Vec<Book>,
        book_items: Vec<BookItem>,
        patrons: Vec<Patron>,
        loans: Vec<Loan>,
    ) -> Self {
        Self {
            dir: None,
            authors,
            books,
            book_items,
            patrons,
            loans,
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Patrons in file order, without loans
    pub fn patrons(&self) -> &[Patron] {
        &self.patrons
    }

    pub fn patron(&self, id: i32) -> Option<&Patron> {
        self.patrons.iter().find(|p| p.id == id)
    }

    pub fn loan(&self, id: i32) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    pub fn loans_for_patron(&self, patron_id: i32) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(move |l| l.patron_id == patron_id)
    }

    /// Case-insensitive exact title match, ignoring surrounding whitespace
    pub fn book_by_title(&self, title: &str) -> Option<&Book> {
        let wanted = title.trim().to_lowercase();
        self.books
            .iter()
            .find(|b| b.title.trim().to_lowercase() == wanted)
    }

    pub fn book_items_for(&self, book_id: i32) -> impl Iterator<Item = &BookItem> {
        self.book_items.iter().filter(move |i| i.book_id == book_id)
    }

    pub fn active_loan_for_item(&self, book_item_id: i32) -> Option<&Loan> {
        self.loans
            .iter()
            .find(|l| l.book_item_id == book_item_id && l.is_active())
    }

    // -----------------------------------------------------------------------
    // Hydration of navigation fields
    // -----------------------------------------------------------------------

    pub fn hydrate_book(&self, book: &Book) -> Book {
        let mut book = book.clone();
        book.author = book
            .author_id
            .and_then(|id| self.authors.iter().find(|a| a.id == id))
            .cloned();
        book
    }

    pub fn hydrate_book_item(&self, item: &BookItem) -> BookItem {
        let mut item = item.clone();
        item.book = self
            .books
            .iter()
            .find(|b| b.id == item.book_id)
            .map(|b| self.hydrate_book(b));
        item
    }

    pub fn hydrate_loan(&self, loan: &Loan) -> Loan {
        let mut loan = loan.clone();
        loan.book_item = self
            .book_items
            .iter()
            .find(|i| i.id == loan.book_item_id)
            .map(|i| self.hydrate_book_item(i));
        loan
    }

    pub fn hydrate_patron(&self, patron: &Patron) -> Patron {
        let mut patron = patron.clone();
        patron.loans = self
            .loans_for_patron(patron.id)
            .map(|l| self.hydrate_loan(l))
            .collect();
        patron
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Replace the stored patron with the same id. Returns false if absent.
    pub fn replace_patron(&mut self, patron: &Patron) -> bool {
        match self.patrons.iter_mut().find(|p| p.id == patron.id) {
            Some(existing) => {
                existing.name = patron.name.clone();
                existing.membership_start = patron.membership_start;
                existing.membership_end = patron.membership_end;
                true
            }
            None => false,
        }
    }

    /// Replace the stored loan with the same id. Returns false if absent.
    pub fn replace_loan(&mut self, loan: &Loan) -> bool {
        match self.loans.iter_mut().find(|l| l.id == loan.id) {
            Some(existing) => {
                existing.book_item_id = loan.book_item_id;
                existing.patron_id = loan.patron_id;
                existing.loan_date = loan.loan_date;
                existing.due_date = loan.due_date;
                existing.return_date = loan.return_date;
                true
            }
            None => false,
        }
    }

    pub async fn save_patrons(&self) -> AppResult<()> {
        self.write_collection(PATRONS_FILE, &self.patrons).await
    }

    pub async fn save_loans(&self) -> AppResult<()> {
        self.write_collection(LOANS_FILE, &self.loans).await
    }

    async fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> AppResult<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };

        let path = dir.join(file);
        let json = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&path, json).await?;
        tracing::debug!("Wrote {} records to {}", items.len(), path.display());
        Ok(())
    }
}

async fn read_collection<T: DeserializeOwned>(path: &Path, required: bool) -> AppResult<Vec<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::warn!("{} not found, starting with an empty collection", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&content)?)
}
