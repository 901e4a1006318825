//! Membership management service

use chrono::{DateTime, Months, Utc};

use crate::{
    config::MembershipConfig,
    error::{AppError, AppResult},
    models::MembershipRenewalStatus,
    repository::Repository,
};

use super::add_days;

#[derive(Clone)]
pub struct PatronService {
    repository: Repository,
    config: MembershipConfig,
}

impl PatronService {
    pub fn new(repository: Repository, config: MembershipConfig) -> Self {
        Self { repository, config }
    }

    /// Renew a patron's membership
    pub async fn renew_membership(&self, patron_id: i32) -> AppResult<MembershipRenewalStatus> {
        self.renew_membership_at(patron_id, Utc::now()).await
    }

    /// Renew a patron's membership as of `now`.
    ///
    /// A membership can only be renewed inside the renewal window before it
    /// ends (or after it has ended), and only while the patron has no overdue
    /// loan. The new end date counts from the later of the current end date
    /// and `now`, so lapsed memberships do not renew into the past.
    pub async fn renew_membership_at(
        &self,
        patron_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<MembershipRenewalStatus> {
        let Some(mut patron) = self.repository.patrons.get_patron(patron_id).await? else {
            return Ok(MembershipRenewalStatus::PatronNotFound);
        };

        if patron.membership_end > add_days(now, self.config.renewal_window_days)? {
            return Ok(MembershipRenewalStatus::TooEarlyToRenew);
        }

        if patron.has_overdue_loans(now) {
            return Ok(MembershipRenewalStatus::LoanNotReturned);
        }

        let base = patron.membership_end.max(now);
        patron.membership_end = base
            .checked_add_months(Months::new(self.config.renewal_period_months))
            .ok_or_else(|| AppError::Internal("Membership end date out of range".to_string()))?;

        self.repository.patrons.update_patron(&patron).await?;
        tracing::info!(
            "Renewed membership for patron {} until {}",
            patron.id,
            patron.membership_end
        );

        Ok(MembershipRenewalStatus::Success)
    }
}
