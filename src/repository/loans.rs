//! Loans repository over the JSON store

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::Loan,
    store::SharedStore,
};

use super::LoanRepository;

#[derive(Clone)]
pub struct JsonLoanRepository {
    store: SharedStore,
}

impl JsonLoanRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LoanRepository for JsonLoanRepository {
    /// Get loan by ID, book item and book resolved
    async fn get_loan(&self, id: i32) -> AppResult<Option<Loan>> {
        let store = self.store.read().await;
        Ok(store.loan(id).map(|l| store.hydrate_loan(l)))
    }

    /// Get loans for a patron
    async fn get_loans_by_patron_id(&self, patron_id: i32) -> AppResult<Vec<Loan>> {
        let store = self.store.read().await;
        Ok(store
            .loans_for_patron(patron_id)
            .map(|l| store.hydrate_loan(l))
            .collect())
    }

    async fn update_loan(&self, loan: &Loan) -> AppResult<()> {
        let mut store = self.store.write().await;

        let Some(previous) = store.loan(loan.id).cloned() else {
            tracing::warn!("Attempted to update unknown loan {}", loan.id);
            return Err(AppError::not_found("Loan", loan.id));
        };

        store.replace_loan(loan);
        if let Err(e) = store.save_loans().await {
            tracing::error!("Failed to save loan {}, change discarded: {}", loan.id, e);
            store.replace_loan(&previous);
            return Err(e);
        }
        tracing::info!("Updated loan {}", loan.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DataStore;
    use chrono::{Duration, TimeZone, Utc};

    fn repository() -> JsonLoanRepository {
        let date = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let loans = (1..=3)
            .map(|id| Loan {
                id,
                book_item_id: id * 10,
                patron_id: if id == 3 { 2 } else { 1 },
                loan_date: date,
                due_date: date + Duration::days(14),
                return_date: None,
                book_item: None,
            })
            .collect();
        let store = DataStore::in_memory(vec![], vec![], vec![], vec![], loans);
        JsonLoanRepository::new(store.into_shared())
    }

    #[tokio::test]
    async fn test_get_loan_returns_none_for_unknown_id() {
        let repo = repository();
        assert!(repo.get_loan(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_loans_by_patron_id() {
        let repo = repository();
        let ids: Vec<i32> = repo
            .get_loans_by_patron_id(1)
            .await
            .unwrap()
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(repo.get_loans_by_patron_id(77).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_loan_round_trip() {
        let repo = repository();
        let mut loan = repo.get_loan(2).await.unwrap().unwrap();
        let returned = Utc.with_ymd_and_hms(2024, 2, 10, 9, 30, 0).unwrap();
        loan.return_date = Some(returned);

        repo.update_loan(&loan).await.unwrap();

        let reloaded = repo.get_loan(2).await.unwrap().unwrap();
        assert_eq!(reloaded.return_date, Some(returned));
    }
}
