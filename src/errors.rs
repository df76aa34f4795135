//! Unified error type for the material tracker.
//!
//! Every fallible operation in the store, the core logic and the CLI returns
//! [`Result`]. Per-row CSV import problems are not errors; they are skipped
//! and only show up in the import summary.

use thiserror::Error;

/// All errors the tracker can surface to the user.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// A required field was empty on direct entry
    #[error("Validation failed: {message}")]
    Validation {
        /// Which field failed and why
        message: String,
    },

    /// A quantity below one was entered
    #[error("Invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// A 1-based position did not point at an existing entry
    #[error("No entry number {position} in {collection}")]
    RecordNotFound {
        /// Name of the collection that was addressed
        collection: &'static str,
        /// The 1-based position that was requested
        position: usize,
    },

    /// The master-list editor refused a value that is already present
    #[error("'{value}' is already in the {list} list")]
    DuplicateEntry {
        /// Master list name
        list: &'static str,
        /// The duplicate value
        value: String,
    },

    /// A report source key that is not configured
    #[error("Unknown report source '{key}'")]
    UnknownReportSource {
        /// The key that was asked for
        key: String,
    },

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure while saving
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV read or write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
