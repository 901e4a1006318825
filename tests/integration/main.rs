//! Integration tests against the shipped dataset

mod data_tests;
mod persistence_tests;

use std::path::PathBuf;

/// The sample data directory checked into the repository
pub fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}
