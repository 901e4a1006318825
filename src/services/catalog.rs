//! Catalog availability service

use crate::{error::AppResult, models::BookAvailability, repository::Repository};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Look up a book by exact title (case-insensitive) and report whether a
    /// copy can be borrowed. Every copy is checked: the book is available if
    /// any copy has no active loan, otherwise the earliest due date is
    /// reported.
    pub async fn check_availability(&self, title: &str) -> AppResult<BookAvailability> {
        let books = &self.repository.books;

        let Some(book) = books.find_by_title(title).await? else {
            return Ok(BookAvailability::NotFound);
        };

        let items = books.get_book_items(book.id).await?;
        if items.is_empty() {
            return Ok(BookAvailability::NoPhysicalCopy(book));
        }

        let mut earliest_due = None;
        for item in &items {
            match books.get_active_loan(item.id).await? {
                None => return Ok(BookAvailability::Available(book)),
                Some(loan) => {
                    earliest_due = Some(match earliest_due {
                        Some(due) if due <= loan.due_date => due,
                        _ => loan.due_date,
                    });
                }
            }
        }

        Ok(match earliest_due {
            Some(due_date) => BookAvailability::OnLoan { book, due_date },
            None => BookAvailability::Available(book),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, BookItem, Loan};
    use crate::repository::{MockBookRepository, MockLoanRepository, MockPatronRepository};
    use chrono::{DateTime, TimeZone, Utc};
    use mockall::predicate::eq;
    use std::sync::Arc;

    fn book() -> Book {
        Book {
            id: 3,
            title: "Middlemarch".to_string(),
            author_id: None,
            genre: None,
            isbn: None,
            author: None,
        }
    }

    fn item(id: i32) -> BookItem {
        BookItem {
            id,
            book_id: 3,
            acquisition_date: None,
            condition: None,
            book: None,
        }
    }

    fn active_loan(book_item_id: i32, due_date: DateTime<Utc>) -> Loan {
        Loan {
            id: book_item_id * 100,
            book_item_id,
            patron_id: 1,
            loan_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            due_date,
            return_date: None,
            book_item: None,
        }
    }

    fn service(books: MockBookRepository) -> CatalogService {
        CatalogService::new(Repository::from_parts(
            Arc::new(MockPatronRepository::new()),
            Arc::new(MockLoanRepository::new()),
            Arc::new(books),
        ))
    }

    #[tokio::test]
    async fn test_unknown_title() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_title().returning(|_| Ok(None));

        let result = service(books).check_availability("Nope").await.unwrap();
        assert_eq!(result, BookAvailability::NotFound);
    }

    #[tokio::test]
    async fn test_book_without_copies() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_title().returning(|_| Ok(Some(book())));
        books.expect_get_book_items().with(eq(3)).returning(|_| Ok(vec![]));
        books.expect_get_active_loan().never();

        let result = service(books).check_availability("middlemarch").await.unwrap();
        assert_eq!(result, BookAvailability::NoPhysicalCopy(book()));
    }

    #[tokio::test]
    async fn test_any_free_copy_is_available() {
        let mut books = MockBookRepository::new();
        books.expect_find_by_title().returning(|_| Ok(Some(book())));
        books
            .expect_get_book_items()
            .returning(|_| Ok(vec![item(1), item(2)]));
        books
            .expect_get_active_loan()
            .with(eq(1))
            .returning(|id| Ok(Some(active_loan(id, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()))));
        books.expect_get_active_loan().with(eq(2)).returning(|_| Ok(None));

        let result = service(books).check_availability("Middlemarch").await.unwrap();
        assert_eq!(result, BookAvailability::Available(book()));
    }

    #[tokio::test]
    async fn test_all_copies_loaned_reports_earliest_due_date() {
        let early = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let mut books = MockBookRepository::new();
        books.expect_find_by_title().returning(|_| Ok(Some(book())));
        books
            .expect_get_book_items()
            .returning(|_| Ok(vec![item(1), item(2)]));
        books
            .expect_get_active_loan()
            .with(eq(1))
            .returning(move |id| Ok(Some(active_loan(id, late))));
        books
            .expect_get_active_loan()
            .with(eq(2))
            .returning(move |id| Ok(Some(active_loan(id, early))));

        let result = service(books).check_availability("Middlemarch").await.unwrap();
        assert_eq!(
            result,
            BookAvailability::OnLoan {
                book: book(),
                due_date: early
            }
        );
    }
}
