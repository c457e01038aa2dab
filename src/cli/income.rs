//! Income CLI commands
//!
//! Implements CLI commands for recording and querying income.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_income_details, format_income_table, format_labels, format_totals};
use crate::error::TallyResult;
use crate::models::{RawRow, RecordId};
use crate::services::{IncomeService, RecordFilter};
use crate::storage::Storage;

use super::{parse_date_filter, report_bulk_outcome};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// List income
    List {
        /// Only this source (case-insensitive)
        #[arg(short, long)]
        source: Option<String>,

        /// Only this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Record new income
    Add {
        /// Where the money came from
        source: String,

        /// Amount (e.g., "1000" or "1000.00")
        amount: String,

        /// Date received (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show one income record
    Show {
        /// Income ID
        id: RecordId,
    },

    /// Change fields of an existing income record
    Edit {
        /// Income ID
        id: RecordId,

        #[arg(short, long)]
        source: Option<String>,

        #[arg(short, long)]
        amount: Option<String>,

        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an income record
    Delete {
        /// Income ID
        id: RecordId,
    },

    /// Sum income
    Total {
        /// Only this source (case-insensitive)
        #[arg(short, long)]
        source: Option<String>,

        /// Only this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Import income from a CSV, XLS or XLSX file (all rows or none)
    Import {
        /// File with source, amount and date columns
        file: PathBuf,
    },

    /// List the sources in use
    Sources,
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> TallyResult<()> {
    let service = IncomeService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        IncomeCommands::List { source, date } => {
            let filter = build_filter(source, date.as_deref())?;
            let incomes = service.list(&filter)?;
            print!("{}", format_income_table(&incomes, symbol));
        }

        IncomeCommands::Add {
            source,
            amount,
            date,
        } => {
            // A missing date is left absent so the validator reports it
            let row = RawRow::new()
                .with("source", source)
                .with("amount", amount)
                .with("date", date);

            let income = service.create(&row)?;
            println!("Created income: {}", income.id);
            print!("{}", format_income_details(&income, symbol));
        }

        IncomeCommands::Show { id } => {
            let income = service.get(id)?;
            print!("{}", format_income_details(&income, symbol));
        }

        IncomeCommands::Edit {
            id,
            source,
            amount,
            date,
        } => {
            let mut patch = RawRow::new();
            if let Some(source) = source {
                patch.insert("source", source);
            }
            if let Some(amount) = amount {
                patch.insert("amount", amount);
            }
            if let Some(date) = date {
                patch.insert("date", date);
            }

            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let income = service.update(id, &patch)?;
            println!("Updated income: {}", income.id);
            print!("{}", format_income_details(&income, symbol));
        }

        IncomeCommands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted income: {}", id);
        }

        IncomeCommands::Total { source, date } => {
            let filter = build_filter(source, date.as_deref())?;
            let totals = service.total(&filter)?;
            print!("{}", format_totals(&totals, symbol));
        }

        IncomeCommands::Import { file } => {
            let outcome = service.bulk_import(&file)?;
            report_bulk_outcome(outcome, "income record(s)")?;
        }

        IncomeCommands::Sources => {
            let labels = service.labels()?;
            print!("{}", format_labels(&labels, "No sources yet."));
        }
    }

    Ok(())
}

fn build_filter(source: Option<String>, date: Option<&str>) -> TallyResult<RecordFilter> {
    let mut filter = RecordFilter::new();
    if let Some(source) = source {
        filter = filter.label(source);
    }
    if let Some(date) = parse_date_filter(date)? {
        filter = filter.date(date);
    }
    Ok(filter)
}
