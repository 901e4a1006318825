//! Data models for the library console

pub mod book;
pub mod loan;
pub mod patron;
pub mod status;

// Re-export commonly used types
pub use book::{Author, Book, BookItem};
pub use loan::Loan;
pub use patron::Patron;
pub use status::{BookAvailability, LoanExtensionStatus, LoanReturnStatus, MembershipRenewalStatus};
