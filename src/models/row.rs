//! Row types exchanged between the decoder, the validator and the records
//!
//! A `RawRow` is what arrives from outside: ordered column names mapped to
//! untyped cell values. A `NormalizedRow` is what the validator hands back
//! once every field has been checked and parsed.

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};

/// An untyped cell or field value
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Absent,
}

impl RawValue {
    /// Build a value from cell text, treating blank text as absent
    pub fn from_cell_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::Absent
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    /// Whether the value counts as missing (absent or blank text)
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Render the value as trimmed text
    ///
    /// Integral numbers render without a fractional part, so a spreadsheet
    /// cell holding `42.0` reads back as "42".
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            Self::Number(n) => Some(n.to_string()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Absent)
    }
}

/// Column name to raw value mapping that keeps column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, RawValue)>,
}

impl RawRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column's value, replacing an existing one in place
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RawValue>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Look up a column's value
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is absent
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_absent())
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// A validated, typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

/// Output of the field validator: typed values keyed by schema field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    values: Vec<(&'static str, FieldValue)>,
}

impl NormalizedRow {
    pub(crate) fn push(&mut self, field: &'static str, value: FieldValue) {
        self.values.push((field, value));
    }

    fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.get(field) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        match self.get(field) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        match self.get(field) {
            Some(FieldValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn require_text(&self, field: &str) -> TallyResult<&str> {
        self.text(field)
            .ok_or_else(|| TallyError::Validation(format!("Missing {}", field)))
    }

    pub fn require_number(&self, field: &str) -> TallyResult<f64> {
        self.number(field)
            .ok_or_else(|| TallyError::Validation(format!("Missing {}", field)))
    }

    pub fn require_date(&self, field: &str) -> TallyResult<NaiveDate> {
        self.date(field)
            .ok_or_else(|| TallyError::Validation(format!("Missing {}", field)))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_absent() {
        assert!(RawValue::from_cell_text("   ").is_absent());
        assert!(RawValue::Text("".into()).is_absent());
        assert!(RawValue::Absent.is_absent());
        assert!(!RawValue::Number(0.0).is_absent());
    }

    #[test]
    fn test_number_as_text() {
        assert_eq!(RawValue::Number(42.0).as_text().as_deref(), Some("42"));
        assert_eq!(RawValue::Number(3.5).as_text().as_deref(), Some("3.5"));
        assert_eq!(RawValue::Text(" Food ".into()).as_text().as_deref(), Some("Food"));
    }

    #[test]
    fn test_row_keeps_column_order_and_replaces_in_place() {
        let mut row = RawRow::new()
            .with("title", "Coffee")
            .with("amount", 3.5)
            .with("category", "Food");
        row.insert("amount", "4.00");

        let columns: Vec<_> = row.columns().collect();
        assert_eq!(columns, vec!["title", "amount", "category"]);
        assert_eq!(row.get("amount"), Some(&RawValue::Text("4.00".into())));
        assert!(row.get("date").is_none());
    }

    #[test]
    fn test_option_into_raw_value() {
        let row = RawRow::new().with("date", None::<String>);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["date"]);
        assert_eq!(row.get("date"), Some(&RawValue::Absent));
        assert!(row.is_blank());
    }

    #[test]
    fn test_normalized_require() {
        let mut row = NormalizedRow::default();
        row.push("title", FieldValue::Text("Coffee".into()));

        assert_eq!(row.require_text("title").unwrap(), "Coffee");
        assert!(row.require_number("amount").unwrap_err().is_validation());
    }
}
