//! Mutations written back to the JSON files

use chrono::{DateTime, TimeZone, Utc};
use library_console::{
    config::AppConfig,
    models::{LoanReturnStatus, MembershipRenewalStatus},
    repository::Repository,
    services::Services,
    store::DataStore,
};
use tempfile::TempDir;

use crate::sample_data_dir;

const FILES: [&str; 5] = [
    "Authors.json",
    "Books.json",
    "BookItems.json",
    "Patrons.json",
    "Loans.json",
];

fn copy_sample_data() -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in FILES {
        std::fs::copy(sample_data_dir().join(file), dir.path().join(file)).unwrap();
    }
    dir
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

async fn services(dir: &TempDir) -> Services {
    let store = DataStore::load(dir.path()).await.unwrap();
    Services::new(Repository::new(store.into_shared()), &AppConfig::default())
}

#[tokio::test]
async fn test_return_loan_is_written_to_disk() {
    let dir = copy_sample_data();

    let status = services(&dir).await.loans.return_loan_at(2, now()).await.unwrap();
    assert_eq!(status, LoanReturnStatus::Success);

    let reloaded = DataStore::load(dir.path()).await.unwrap();
    assert_eq!(reloaded.loan(2).unwrap().return_date, Some(now()));
    assert!(reloaded.loan(3).unwrap().return_date.is_none());
}

#[tokio::test]
async fn test_renewal_survives_reload() {
    let dir = copy_sample_data();

    let status = services(&dir)
        .await
        .patrons
        .renew_membership_at(4, now())
        .await
        .unwrap();
    assert_eq!(status, MembershipRenewalStatus::Success);

    let reloaded = DataStore::load(dir.path()).await.unwrap();
    let patron = reloaded.patron(4).unwrap();
    assert_eq!(
        patron.membership_end,
        Utc.with_ymd_and_hms(2027, 10, 19, 12, 0, 0).unwrap()
    );
    assert_eq!(patron.name, "Adam Smith");
}

#[tokio::test]
async fn test_missing_required_file_fails_to_load() {
    let dir = copy_sample_data();
    std::fs::remove_file(dir.path().join("Loans.json")).unwrap();

    assert!(DataStore::load(dir.path()).await.is_err());
}

#[tokio::test]
async fn test_missing_authors_file_is_tolerated() {
    let dir = copy_sample_data();
    std::fs::remove_file(dir.path().join("Authors.json")).unwrap();

    let store = DataStore::load(dir.path()).await.unwrap();
    let book = store.book_by_title("Emma").unwrap();
    assert!(store.hydrate_book(book).author.is_none());
}

/// Swap a data file for a directory so the next write to it fails
fn block_writes(dir: &TempDir, file: &str) {
    let path = dir.path().join(file);
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();
}

#[tokio::test]
async fn test_failed_loan_save_keeps_memory_unchanged() {
    let dir = copy_sample_data();
    let store = DataStore::load(dir.path()).await.unwrap();
    let repository = Repository::new(store.into_shared());
    let services = Services::new(repository.clone(), &AppConfig::default());
    block_writes(&dir, "Loans.json");

    assert!(services.loans.return_loan_at(2, now()).await.is_err());

    let loan = repository.loans.get_loan(2).await.unwrap().unwrap();
    assert!(loan.return_date.is_none());
}

#[tokio::test]
async fn test_failed_patron_save_keeps_memory_unchanged() {
    let dir = copy_sample_data();
    let store = DataStore::load(dir.path()).await.unwrap();
    let repository = Repository::new(store.into_shared());
    let services = Services::new(repository.clone(), &AppConfig::default());
    let before = repository.patrons.get_patron(4).await.unwrap().unwrap();
    block_writes(&dir, "Patrons.json");

    assert!(services.patrons.renew_membership_at(4, now()).await.is_err());

    let after = repository.patrons.get_patron(4).await.unwrap().unwrap();
    assert_eq!(after.membership_end, before.membership_end);
}
