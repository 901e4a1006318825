//! Outcomes of business operations, printed verbatim by the console

use chrono::{DateTime, Utc};

use super::book::Book;

// ---------------------------------------------------------------------------
// MembershipRenewalStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipRenewalStatus {
    Success,
    PatronNotFound,
    TooEarlyToRenew,
    LoanNotReturned,
}

impl std::fmt::Display for MembershipRenewalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MembershipRenewalStatus::Success => "Membership renewal was successful.",
            MembershipRenewalStatus::PatronNotFound => "Patron not found.",
            MembershipRenewalStatus::TooEarlyToRenew => "It is too early to renew the membership.",
            MembershipRenewalStatus::LoanNotReturned => {
                "Cannot renew membership due to an outstanding loan."
            }
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// LoanReturnStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanReturnStatus {
    Success,
    LoanNotFound,
    AlreadyReturned,
}

impl std::fmt::Display for LoanReturnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanReturnStatus::Success => "Book was successfully returned.",
            LoanReturnStatus::LoanNotFound => "Loan not found.",
            LoanReturnStatus::AlreadyReturned => "Cannot return book as the book is already returned.",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// LoanExtensionStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanExtensionStatus {
    Success,
    LoanNotFound,
    LoanExpired,
    MembershipExpired,
    LoanReturned,
}

impl std::fmt::Display for LoanExtensionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanExtensionStatus::Success => "Book loan extension was successful.",
            LoanExtensionStatus::LoanNotFound => "Loan not found.",
            LoanExtensionStatus::LoanExpired => "Cannot extend book loan as it already has expired. Return the book instead.",
            LoanExtensionStatus::MembershipExpired => {
                "Cannot extend book loan due to expired patron's membership."
            }
            LoanExtensionStatus::LoanReturned => "Cannot extend book loan as the book is already returned.",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// BookAvailability
// ---------------------------------------------------------------------------

/// Result of a title lookup against the catalog and the active loans
#[derive(Debug, Clone, PartialEq)]
pub enum BookAvailability {
    NotFound,
    /// The book is catalogued but no copy exists
    NoPhysicalCopy(Book),
    Available(Book),
    /// Every copy is loaned out; `due_date` is the earliest one
    OnLoan { book: Book, due_date: DateTime<Utc> },
}
