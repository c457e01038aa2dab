//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod income;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::services::BulkOutcome;
use crate::validation::parse_date_str;

/// Parse an optional `--date` filter argument
pub(crate) fn parse_date_filter(date: Option<&str>) -> TallyResult<Option<NaiveDate>> {
    match date {
        None => Ok(None),
        Some(s) => parse_date_str(s).map(Some).ok_or_else(|| {
            TallyError::Validation(format!("Invalid date filter '{}' (YYYY-MM-DD expected)", s))
        }),
    }
}

/// Print the outcome of an import; a rejected batch becomes an error
pub(crate) fn report_bulk_outcome(outcome: BulkOutcome, noun: &str) -> TallyResult<()> {
    match outcome {
        BulkOutcome::Added(count) => {
            println!("Imported {} {}", count, noun);
            Ok(())
        }
        BulkOutcome::Rejected(errors) => {
            for error in &errors {
                eprintln!("{}", error);
            }
            Err(TallyError::Validation(format!(
                "{} row(s) rejected; nothing was imported",
                errors.len()
            )))
        }
    }
}
