//! Library Console
//!
//! A librarian's desk application: search patrons, review their loans,
//! return or extend loans, renew memberships and check book availability.
//! Data lives in flat JSON files loaded into memory at startup.

pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
