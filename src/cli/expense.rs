//! Expense CLI commands
//!
//! Implements CLI commands for recording and querying expenses.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{
    format_expense_details, format_expense_table, format_labels, format_totals,
};
use crate::error::TallyResult;
use crate::models::{RawRow, RecordId};
use crate::services::{ExpenseService, RecordFilter};
use crate::storage::Storage;

use super::{parse_date_filter, report_bulk_outcome};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses
    List {
        /// Only this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Only this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Record a new expense
    Add {
        /// What the money was spent on
        title: String,

        /// Amount (e.g., "3.50")
        amount: String,

        /// Category name
        category: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: RecordId,
    },

    /// Change fields of an existing expense
    Edit {
        /// Expense ID
        id: RecordId,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        amount: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: RecordId,
    },

    /// Sum expenses
    Total {
        /// Only this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Only this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Import expenses from a CSV, XLS or XLSX file (all rows or none)
    Import {
        /// File with title, amount, category and optional date columns
        file: PathBuf,
    },

    /// List the categories in use
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TallyResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::List { category, date } => {
            let filter = build_filter(category, date.as_deref())?;
            let expenses = service.list(&filter)?;
            print!("{}", format_expense_table(&expenses, symbol));
        }

        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
        } => {
            let mut row = RawRow::new()
                .with("title", title)
                .with("amount", amount)
                .with("category", category);
            if let Some(date) = date {
                row.insert("date", date);
            }

            let expense = service.create(&row)?;
            println!("Created expense: {}", expense.id);
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::Show { id } => {
            let expense = service.get(id)?;
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::Edit {
            id,
            title,
            amount,
            category,
            date,
        } => {
            let mut patch = RawRow::new();
            if let Some(title) = title {
                patch.insert("title", title);
            }
            if let Some(amount) = amount {
                patch.insert("amount", amount);
            }
            if let Some(category) = category {
                patch.insert("category", category);
            }
            if let Some(date) = date {
                patch.insert("date", date);
            }

            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let expense = service.update(id, &patch)?;
            println!("Updated expense: {}", expense.id);
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted expense: {}", id);
        }

        ExpenseCommands::Total { category, date } => {
            let filter = build_filter(category, date.as_deref())?;
            let totals = service.total(&filter)?;
            print!("{}", format_totals(&totals, symbol));
        }

        ExpenseCommands::Import { file } => {
            let outcome = service.bulk_import(&file)?;
            report_bulk_outcome(outcome, "expense(s)")?;
        }

        ExpenseCommands::Categories => {
            let labels = service.labels()?;
            print!("{}", format_labels(&labels, "No categories yet."));
        }
    }

    Ok(())
}

fn build_filter(category: Option<String>, date: Option<&str>) -> TallyResult<RecordFilter> {
    let mut filter = RecordFilter::new();
    if let Some(category) = category {
        filter = filter.label(category);
    }
    if let Some(date) = parse_date_filter(date)? {
        filter = filter.date(date);
    }
    Ok(filter)
}
