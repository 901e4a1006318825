//! Repository layer over the JSON data store

pub mod books;
pub mod loans;
pub mod patrons;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookItem, Loan, Patron},
    store::SharedStore,
};

/// Patron lookups and membership persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatronRepository: Send + Sync {
    /// Case-insensitive substring match on name, in store order. Loans are
    /// not populated.
    async fn search_patrons(&self, name: &str) -> AppResult<Vec<Patron>>;

    /// Patron with loans populated, each loan's book item and book resolved
    async fn get_patron(&self, id: i32) -> AppResult<Option<Patron>>;

    /// Fails with `NotFound` if the patron id is unknown. A failed save leaves
    /// the stored patron unchanged.
    async fn update_patron(&self, patron: &Patron) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn get_loan(&self, id: i32) -> AppResult<Option<Loan>>;

    async fn get_loans_by_patron_id(&self, patron_id: i32) -> AppResult<Vec<Loan>>;

    /// Fails with `NotFound` if the loan id is unknown. A failed save leaves
    /// the stored loan unchanged.
    async fn update_loan(&self, loan: &Loan) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>>;

    async fn get_book_items(&self, book_id: i32) -> AppResult<Vec<BookItem>>;

    async fn get_active_loan(&self, book_item_id: i32) -> AppResult<Option<Loan>>;
}

/// Main repository struct holding one handle per aggregate
#[derive(Clone)]
pub struct Repository {
    pub patrons: Arc<dyn PatronRepository>,
    pub loans: Arc<dyn LoanRepository>,
    pub books: Arc<dyn BookRepository>,
}

impl Repository {
    /// Create JSON-backed repositories sharing the given store
    pub fn new(store: SharedStore) -> Self {
        Self {
            patrons: Arc::new(patrons::JsonPatronRepository::new(store.clone())),
            loans: Arc::new(loans::JsonLoanRepository::new(store.clone())),
            books: Arc::new(books::JsonBookRepository::new(store)),
        }
    }

    pub fn from_parts(
        patrons: Arc<dyn PatronRepository>,
        loans: Arc<dyn LoanRepository>,
        books: Arc<dyn BookRepository>,
    ) -> Self {
        Self { patrons, loans, books }
    }
}
