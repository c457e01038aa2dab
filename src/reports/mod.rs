//! Reports module for Tally
//!
//! Provides the income versus expense summary over both collections.

pub mod summary;

pub use summary::{LabelTotal, LedgerSummary, MonthlyTotals};
