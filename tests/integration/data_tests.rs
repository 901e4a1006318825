//! Lookups against the sample JSON files

use chrono::{TimeZone, Utc};
use library_console::{
    config::AppConfig,
    models::BookAvailability,
    repository::Repository,
    services::Services,
    store::DataStore,
};

use crate::sample_data_dir;

async fn repository() -> Repository {
    let store = DataStore::load(sample_data_dir())
        .await
        .expect("Failed to load sample data");
    Repository::new(store.into_shared())
}

#[tokio::test]
async fn test_get_loan_returns_none_when_id_is_not_found() {
    let repository = repository().await;
    let loan = repository.loans.get_loan(999).await.unwrap();
    assert!(loan.is_none());
}

#[tokio::test]
async fn test_get_loan_resolves_book() {
    let repository = repository().await;
    let loan = repository.loans.get_loan(2).await.unwrap().unwrap();
    assert_eq!(loan.book_title().as_deref(), Some("Moby Dick by Herman Melville"));
}

#[tokio::test]
async fn test_search_patrons() {
    let repository = repository().await;

    let names: Vec<String> = repository
        .patrons
        .search_patrons("AD")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(names, vec!["Ada Lovelace", "Adam Smith"]);
    assert!(repository.patrons.search_patrons("xyz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_patron_populates_loans() {
    let repository = repository().await;
    let patron = repository.patrons.get_patron(1).await.unwrap().unwrap();

    let loan_ids: Vec<i32> = patron.loans.iter().map(|l| l.id).collect();
    assert_eq!(loan_ids, vec![1, 2]);
    assert!(patron.loans.iter().all(|l| l.book_title().is_some()));
    assert!(repository.patrons.get_patron(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_book_availability() {
    let services = Services::new(repository().await, &AppConfig::default());
    let catalog = &services.catalog;

    assert!(matches!(
        catalog.check_availability("emma").await.unwrap(),
        BookAvailability::NoPhysicalCopy(book) if book.title == "Emma"
    ));
    assert!(matches!(
        catalog.check_availability("Frankenstein").await.unwrap(),
        BookAvailability::Available(_)
    ));
    assert_eq!(
        catalog.check_availability("Don Quixote").await.unwrap(),
        BookAvailability::NotFound
    );

    match catalog.check_availability("pride and prejudice").await.unwrap() {
        BookAvailability::OnLoan { book, due_date } => {
            assert_eq!(book.id, 1);
            assert_eq!(due_date, Utc.with_ymd_and_hms(2026, 10, 4, 9, 0, 0).unwrap());
        }
        other => panic!("expected the book to be on loan, got {:?}", other),
    }
}
