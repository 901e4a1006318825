//! Business logic services

pub mod catalog;
pub mod loans;
pub mod patrons;

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub patrons: patrons::PatronService,
    pub loans: loans::LoanService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            patrons: patrons::PatronService::new(repository.clone(), config.membership.clone()),
            loans: loans::LoanService::new(repository.clone(), config.loans.clone()),
            catalog: catalog::CatalogService::new(repository),
        }
    }
}

/// `date` shifted by `days`. Configured day counts can push a date past what
/// chrono represents, which is reported instead of panicking.
pub(crate) fn add_days(date: DateTime<Utc>, days: i64) -> AppResult<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| AppError::Internal(format!("Date {} + {} days is out of range", date, days)))
}
