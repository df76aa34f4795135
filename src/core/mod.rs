//! Core business logic, independent of the command-line front end.
//!
//! Functions here take the [`Store`](crate::store::Store) and plain values,
//! validate, persist and log. Reconciliation (remaining stock and ONT usage)
//! is pure and recomputed on every request.

/// Header-keyed CSV reading
pub mod columns;
/// CSV export of histories and report rows
pub mod export;
/// CSV import of withdrawal histories
pub mod import;
/// Master list promotion and editing
pub mod master;
/// ONT withdrawal history
pub mod ont;
/// External usage report loading and filtering
pub mod report;
/// Stock-in entries and remaining stock
pub mod stock;
/// ONT usage classification
pub mod usage;
/// Withdrawal form and material history
pub mod withdrawal;
