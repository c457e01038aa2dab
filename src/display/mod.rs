//! Display formatting for terminal output
//!
//! Provides utilities for formatting records, totals and the summary
//! report for terminal display.

pub mod records;
pub mod summary;

pub use records::{
    format_expense_details, format_expense_table, format_income_details, format_income_table,
    format_labels, format_money, format_totals,
};
pub use summary::format_summary;
