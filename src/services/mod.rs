//! Service layer for Tally
//!
//! The service layer provides the record store contract on top of the
//! storage layer: validation, id assignment, filtering and totals.

pub mod ledger;
pub mod query;

pub use ledger::{BulkOutcome, ExpenseService, IncomeService, LedgerService};
pub use query::{round_cents, RecordFilter, Totals};
