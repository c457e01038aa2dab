//! Record display formatting
//!
//! Formats expenses and incomes as tables, plus totals and label lists.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Expense, Income};
use crate::services::Totals;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format an amount with the currency symbol, sign in front
pub fn format_money(amount: f64, symbol: &str) -> String {
    if amount < 0.0 && amount.abs() >= 0.005 {
        format!("-{}{:.2}", symbol, amount.abs())
    } else {
        format!("{}{:.2}", symbol, amount.abs())
    }
}

/// Format expenses as a table
pub fn format_expense_table(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format("%Y-%m-%d").to_string(),
        title: e.title.clone(),
        category: e.category.clone(),
        amount: format_money(e.amount, symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{}\n", table)
}

/// Format incomes as a table
pub fn format_income_table(incomes: &[Income], symbol: &str) -> String {
    if incomes.is_empty() {
        return "No incomes found.\n".to_string();
    }

    let rows = incomes.iter().map(|i| IncomeRow {
        id: i.id.to_string(),
        date: i.date.format("%Y-%m-%d").to_string(),
        source: i.source.clone(),
        amount: format_money(i.amount, symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{}\n", table)
}

/// Format one expense for detail view
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("Title:    {}\n", expense.title));
    output.push_str(&format!("Amount:   {}\n", format_money(expense.amount, symbol)));
    output.push_str(&format!("Category: {}\n", expense.category));
    output.push_str(&format!("Date:     {}\n", expense.date.format("%Y-%m-%d")));
    output
}

/// Format one income for detail view
pub fn format_income_details(income: &Income, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Income: {}\n", income.id));
    output.push_str(&format!("Source: {}\n", income.source));
    output.push_str(&format!("Amount: {}\n", format_money(income.amount, symbol)));
    output.push_str(&format!("Date:   {}\n", income.date.format("%Y-%m-%d")));
    output
}

/// Format a total line, e.g. "Total: $13.50 (3 records)"
pub fn format_totals(totals: &Totals, symbol: &str) -> String {
    let noun = if totals.count == 1 { "record" } else { "records" };
    format!(
        "Total: {} ({} {})\n",
        format_money(totals.total, symbol),
        totals.count,
        noun
    )
}

/// Format a list of categories or sources, one per line
pub fn format_labels(labels: &[String], empty_message: &str) -> String {
    if labels.is_empty() {
        return format!("{}\n", empty_message);
    }

    let mut output = String::new();
    for label in labels {
        output.push_str(label);
        output.push('\n');
    }
    output
}
