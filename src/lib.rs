//! Material Tracker - a withdrawal logbook for telecom field teams.
//!
//! Records materials, accessories and ONT units taken from the warehouse,
//! tracks incoming stock, and reconciles withdrawn ONTs against external
//! installation reports. All data lives in JSON files in one directory.

// Hard errors
#![deny(
    unsafe_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    // Data files and CSV input come from users; surface errors instead of panicking
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::dbg_macro,
    clippy::todo,
    // Store and core helpers take borrowed records and lists
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,
    clippy::redundant_closure_for_method_calls,
    clippy::too_many_lines,
    clippy::wildcard_imports,
    rust_2018_idioms,
)]
// Store and entity types are named after their module (`store::Store`)
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

/// Command-line front end
pub mod cli;
/// Settings file, environment overrides and report sources
pub mod config;
/// Core business logic - withdrawals, stock, reconciliation, import and export
pub mod core;
/// Persisted record types
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// JSON-file persistence
pub mod store;

#[cfg(test)]
pub mod test_utils;
