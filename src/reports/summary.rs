//! Ledger summary
//!
//! Income versus expense analytics over both collections: totals, net
//! balance, the biggest category and source, per-label breakdowns, a
//! month-by-month series and the most recently added records.

use serde::Serialize;

use crate::error::TallyResult;
use crate::models::{Expense, Income, Record};
use crate::services::{round_cents, ExpenseService, IncomeService, RecordFilter};
use crate::storage::Storage;

/// Amount summed under one category or source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelTotal {
    pub label: String,
    pub total: f64,
    pub count: usize,
}

/// Income and expense for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// `YYYY-MM`
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// Summary of the whole ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expense: f64,
    /// Income minus expense
    pub net_balance: f64,
    pub top_source: Option<LabelTotal>,
    pub top_category: Option<LabelTotal>,
    /// Income per source, first-seen order
    pub by_source: Vec<LabelTotal>,
    /// Expense per category, first-seen order
    pub by_category: Vec<LabelTotal>,
    /// Sorted by month
    pub monthly: Vec<MonthlyTotals>,
    /// Newest first
    pub recent_expenses: Vec<Expense>,
    /// Newest first
    pub recent_incomes: Vec<Income>,
}

impl LedgerSummary {
    /// Generate the summary from both collections
    pub fn generate(storage: &Storage, recent: usize) -> TallyResult<Self> {
        let expenses = ExpenseService::new(storage).list(&RecordFilter::new())?;
        let incomes = IncomeService::new(storage).list(&RecordFilter::new())?;
        Ok(Self::from_records(&expenses, &incomes, recent))
    }

    /// Build the summary from already-loaded records in insertion order
    pub fn from_records(expenses: &[Expense], incomes: &[Income], recent: usize) -> Self {
        let total_income = round_cents(incomes.iter().map(Income::amount).sum());
        let total_expense = round_cents(expenses.iter().map(Expense::amount).sum());

        let by_source = totals_by_label(incomes);
        let by_category = totals_by_label(expenses);

        Self {
            total_income,
            total_expense,
            net_balance: round_cents(total_income - total_expense),
            top_source: largest(&by_source),
            top_category: largest(&by_category),
            by_source,
            by_category,
            monthly: monthly_series(expenses, incomes),
            recent_expenses: newest(expenses, recent),
            recent_incomes: newest(incomes, recent),
        }
    }
}

fn totals_by_label<R: Record>(records: &[R]) -> Vec<LabelTotal> {
    let mut totals: Vec<LabelTotal> = Vec::new();

    for record in records {
        match totals.iter_mut().find(|t| t.label == record.label()) {
            Some(entry) => {
                entry.total += record.amount();
                entry.count += 1;
            }
            None => totals.push(LabelTotal {
                label: record.label().to_string(),
                total: record.amount(),
                count: 1,
            }),
        }
    }

    for entry in &mut totals {
        entry.total = round_cents(entry.total);
    }
    totals
}

/// Highest total; on a tie the label seen first wins
fn largest(totals: &[LabelTotal]) -> Option<LabelTotal> {
    let mut best: Option<&LabelTotal> = None;
    for entry in totals {
        if best.map_or(true, |b| entry.total > b.total) {
            best = Some(entry);
        }
    }
    best.cloned()
}

fn monthly_series(expenses: &[Expense], incomes: &[Income]) -> Vec<MonthlyTotals> {
    let mut months: Vec<MonthlyTotals> = Vec::new();

    let mut bucket = |month: String| -> usize {
        match months.iter().position(|m| m.month == month) {
            Some(idx) => idx,
            None => {
                months.push(MonthlyTotals {
                    month,
                    income: 0.0,
                    expense: 0.0,
                    net: 0.0,
                });
                months.len() - 1
            }
        }
    };

    let mut income_rows = Vec::new();
    for income in incomes {
        income_rows.push((bucket(income.date.format("%Y-%m").to_string()), income.amount));
    }
    let mut expense_rows = Vec::new();
    for expense in expenses {
        expense_rows.push((bucket(expense.date.format("%Y-%m").to_string()), expense.amount));
    }

    for (idx, amount) in income_rows {
        months[idx].income += amount;
    }
    for (idx, amount) in expense_rows {
        months[idx].expense += amount;
    }

    for month in &mut months {
        month.income = round_cents(month.income);
        month.expense = round_cents(month.expense);
        month.net = round_cents(month.income - month.expense);
    }

    months.sort_by(|a, b| a.month.cmp(&b.month));
    months
}

fn newest<R: Record>(records: &[R], count: usize) -> Vec<R> {
    records.iter().rev().take(count).cloned().collect()
}
