//! Summary report formatting

use crate::reports::{LabelTotal, LedgerSummary};

use super::records::{format_expense_table, format_income_table, format_money};

/// Format the ledger summary for terminal display
pub fn format_summary(summary: &LedgerSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Ledger Summary\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Total Income:   {:>14}\n",
        format_money(summary.total_income, symbol)
    ));
    output.push_str(&format!(
        "Total Expenses: {:>14}\n",
        format_money(summary.total_expense, symbol)
    ));
    output.push_str(&format!(
        "Net Balance:    {:>14}\n",
        format_money(summary.net_balance, symbol)
    ));
    output.push_str(&format!(
        "Top Source:     {}\n",
        top_label(summary.top_source.as_ref(), symbol)
    ));
    output.push_str(&format!(
        "Top Category:   {}\n",
        top_label(summary.top_category.as_ref(), symbol)
    ));

    if !summary.monthly.is_empty() {
        output.push_str(&format!(
            "\n{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expense", "Net"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for month in &summary.monthly {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                month.month,
                format_money(month.income, symbol),
                format_money(month.expense, symbol),
                format_money(month.net, symbol)
            ));
        }
    }

    push_breakdown(&mut output, "Income by Source", &summary.by_source, symbol);
    push_breakdown(&mut output, "Expenses by Category", &summary.by_category, symbol);

    output.push_str("\nRecent Expenses\n");
    output.push_str(&format_expense_table(&summary.recent_expenses, symbol));
    output.push_str("\nRecent Incomes\n");
    output.push_str(&format_income_table(&summary.recent_incomes, symbol));

    output
}

fn top_label(entry: Option<&LabelTotal>, symbol: &str) -> String {
    match entry {
        Some(t) => format!("{} ({})", t.label, format_money(t.total, symbol)),
        None => "-".to_string(),
    }
}

fn push_breakdown(output: &mut String, title: &str, totals: &[LabelTotal], symbol: &str) {
    if totals.is_empty() {
        return;
    }

    output.push_str(&format!("\n{}\n", title));
    for entry in totals {
        output.push_str(&format!(
            "  {:<30} {:>14} {:>6}\n",
            entry.label,
            format_money(entry.total, symbol),
            entry.count
        ));
    }
}
