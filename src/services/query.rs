//! Record filtering and totals
//!
//! Filters narrow a collection by label (category or source, matched
//! case-insensitively) and by exact date. They never reorder records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Record;

/// Options for filtering records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Category (expenses) or source (incomes); blank means no filter
    pub label: Option<String>,
    /// Exact date match
    pub date: Option<NaiveDate>,
}

impl RecordFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category or source
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Filter by date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    fn active_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// Whether the filter lets everything through
    pub fn is_empty(&self) -> bool {
        self.active_label().is_none() && self.date.is_none()
    }

    /// Check a single record
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        if let Some(label) = self.active_label() {
            if record.label().to_lowercase() != label.to_lowercase() {
                return false;
            }
        }

        if let Some(date) = self.date {
            if record.date() != date {
                return false;
            }
        }

        true
    }

    /// Keep matching records in their original order
    pub fn apply<R: Record>(&self, records: Vec<R>) -> Vec<R> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Sum and count of a set of records
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of amounts, rounded to cents
    pub total: f64,
    pub count: usize,
}

impl Totals {
    /// Sum the amounts of the given records
    pub fn of<R: Record>(records: &[R]) -> Self {
        let sum: f64 = records.iter().map(Record::amount).sum();
        Self {
            total: round_cents(sum),
            count: records.len(),
        }
    }
}

/// Round to two decimal places for display
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, RecordId};

    fn expense(id: i64, category: &str, amount: f64, day: u32) -> Expense {
        Expense {
            id: RecordId::new(id),
            title: format!("item {}", id),
            amount,
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, "Food", 3.5, 1),
            expense(2, "Rent", 1200.0, 1),
            expense(3, "food", 10.111, 2),
            expense(4, "FOOD", 0.1, 3),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let filtered = RecordFilter::new().apply(sample());
        let ids: Vec<_> = filtered.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_label_match_is_case_insensitive() {
        let filtered = RecordFilter::new().label("Food").apply(sample());
        let ids: Vec<_> = filtered.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_blank_label_is_ignored() {
        let filter = RecordFilter::new().label("  ");
        assert!(filter.is_empty());
        assert_eq!(filter.apply(sample()).len(), 4);
    }

    #[test]
    fn test_label_is_not_trimmed() {
        let filtered = RecordFilter::new().label(" Food ").apply(sample());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_date_and_label_combine() {
        let filter = RecordFilter::new()
            .label("food")
            .date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        let filtered = filter.apply(sample());

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.value(), 1);
    }

    #[test]
    fn test_totals_round_to_cents() {
        let food = RecordFilter::new().label("food").apply(sample());
        let totals = Totals::of(&food);

        assert_eq!(totals.count, 3);
        assert_eq!(totals.total, 13.71);
    }

    #[test]
    fn test_totals_of_nothing() {
        let totals = Totals::of::<Expense>(&[]);
        assert_eq!(totals.total, 0.0);
        assert_eq!(totals.count, 0);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
        assert_eq!(round_cents(-0.001), 0.0);
        assert_eq!(round_cents(1234.567), 1234.57);
    }
}
