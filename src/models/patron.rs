//! Patron (library member) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::loan::Loan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Patron {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub membership_start: Option<DateTime<Utc>>,
    pub membership_end: DateTime<Utc>,
    /// Populated only by single-patron lookups
    #[serde(skip)]
    pub loans: Vec<Loan>,
}

impl Patron {
    pub fn is_membership_expired(&self, now: DateTime<Utc>) -> bool {
        self.membership_end < now
    }

    pub fn has_overdue_loans(&self, now: DateTime<Utc>) -> bool {
        self.loans.iter().any(|loan| loan.is_overdue(now))
    }
}
