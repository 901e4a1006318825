//! Book and book item lookups over the JSON store

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookItem, Loan},
    store::SharedStore,
};

use super::BookRepository;

#[derive(Clone)]
pub struct JsonBookRepository {
    store: SharedStore,
}

impl JsonBookRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookRepository for JsonBookRepository {
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let store = self.store.read().await;
        Ok(store.book_by_title(title).map(|b| store.hydrate_book(b)))
    }

    async fn get_book_items(&self, book_id: i32) -> AppResult<Vec<BookItem>> {
        let store = self.store.read().await;
        Ok(store.book_items_for(book_id).cloned().collect())
    }

    async fn get_active_loan(&self, book_item_id: i32) -> AppResult<Option<Loan>> {
        let store = self.store.read().await;
        Ok(store.active_loan_for_item(book_item_id).cloned())
    }
}
