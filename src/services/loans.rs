//! Loan management service

use chrono::{DateTime, Utc};

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::{LoanExtensionStatus, LoanReturnStatus},
    repository::Repository,
};

use super::add_days;

#[derive(Clone)]
pub struct LoanService {
    repository: Repository,
    config: LoansConfig,
}

impl LoanService {
    pub fn new(repository: Repository, config: LoansConfig) -> Self {
        Self { repository, config }
    }

    /// Return a borrowed item
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<LoanReturnStatus> {
        self.return_loan_at(loan_id, Utc::now()).await
    }

    pub async fn return_loan_at(
        &self,
        loan_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<LoanReturnStatus> {
        let Some(mut loan) = self.repository.loans.get_loan(loan_id).await? else {
            return Ok(LoanReturnStatus::LoanNotFound);
        };

        if !loan.is_active() {
            return Ok(LoanReturnStatus::AlreadyReturned);
        }

        loan.return_date = Some(now);
        self.repository.loans.update_loan(&loan).await?;
        tracing::info!("Loan {} returned", loan_id);

        Ok(LoanReturnStatus::Success)
    }

    /// Extend the due date of an active loan
    pub async fn extend_loan(&self, loan_id: i32) -> AppResult<LoanExtensionStatus> {
        self.extend_loan_at(loan_id, Utc::now()).await
    }

    pub async fn extend_loan_at(
        &self,
        loan_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<LoanExtensionStatus> {
        let Some(mut loan) = self.repository.loans.get_loan(loan_id).await? else {
            return Ok(LoanExtensionStatus::LoanNotFound);
        };

        if !loan.is_active() {
            return Ok(LoanExtensionStatus::LoanReturned);
        }

        // A loan always points at a patron; a dangling reference is a data error
        let patron = self
            .repository
            .patrons
            .get_patron(loan.patron_id)
            .await?
            .ok_or_else(|| AppError::not_found("Patron", loan.patron_id))?;

        if patron.is_membership_expired(now) {
            return Ok(LoanExtensionStatus::MembershipExpired);
        }

        if loan.is_overdue(now) {
            return Ok(LoanExtensionStatus::LoanExpired);
        }

        loan.due_date = add_days(loan.due_date, self.config.extend_by_days)?;
        self.repository.loans.update_loan(&loan).await?;
        tracing::info!("Loan {} extended until {}", loan_id, loan.due_date);

        Ok(LoanExtensionStatus::Success)
    }
}
