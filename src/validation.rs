//! Field validation
//!
//! Turns a raw row into typed field values according to a record schema.
//! Fields are checked in schema order and the first failure wins; its
//! reason string is what users see, so the wording is part of the contract.

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::models::{FieldKind, FieldSpec, FieldValue, NormalizedRow, RawRow, RawValue, Schema, WhenAbsent};

/// The only accepted date layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a complete row
///
/// `today` is substituted for absent date fields whose schema allows it.
pub fn validate(schema: &Schema, row: &RawRow, today: NaiveDate) -> TallyResult<NormalizedRow> {
    let mut normalized = NormalizedRow::default();

    for field in schema.fields {
        match row.get(field.name).filter(|value| !value.is_absent()) {
            Some(value) => normalized.push(field.name, parse_field(field, value)?),
            None => match field.when_absent {
                WhenAbsent::Reject => return Err(reject(field.missing)),
                WhenAbsent::Today => normalized.push(field.name, FieldValue::Date(today)),
            },
        }
    }

    Ok(normalized)
}

/// Validate a partial update
///
/// Only fields the patch carries are checked. Blank values for required
/// fields are rejected; a blank optional date leaves the stored date alone.
pub fn validate_patch(schema: &Schema, patch: &RawRow) -> TallyResult<NormalizedRow> {
    let mut normalized = NormalizedRow::default();

    for field in schema.fields {
        let Some(value) = patch.get(field.name) else {
            continue;
        };

        if value.is_absent() {
            if field.is_required() {
                return Err(reject(field.missing));
            }
            continue;
        }

        normalized.push(field.name, parse_field(field, value)?);
    }

    Ok(normalized)
}

fn parse_field(field: &FieldSpec, value: &RawValue) -> TallyResult<FieldValue> {
    let parsed = match field.kind {
        FieldKind::Text => value.as_text().map(FieldValue::Text),
        FieldKind::Number => parse_amount(value).map(FieldValue::Number),
        FieldKind::Date => parse_date(value).map(FieldValue::Date),
    };

    parsed.ok_or_else(|| reject(field.invalid))
}

fn reject(reason: &str) -> TallyError {
    TallyError::Validation(reason.to_string())
}

/// Parse a finite number from a native number or numeric text
pub fn parse_amount(value: &RawValue) -> Option<f64> {
    let amount = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Absent => return None,
    };

    amount.is_finite().then_some(amount)
}

/// Parse a `YYYY-MM-DD` date; any other layout fails
pub fn parse_date(value: &RawValue) -> Option<NaiveDate> {
    match value {
        RawValue::Text(s) => parse_date_str(s),
        RawValue::Number(_) | RawValue::Absent => None,
    }
}

/// Parse `YYYY-MM-DD` text
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EXPENSE_SCHEMA, INCOME_SCHEMA};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn reason(result: TallyResult<NormalizedRow>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_valid_expense_without_date_uses_today() {
        let row = RawRow::new()
            .with("title", "Coffee")
            .with("amount", "3.50")
            .with("category", "Food");

        let fields = validate(&EXPENSE_SCHEMA, &row, today()).unwrap();

        assert_eq!(fields.text("title"), Some("Coffee"));
        assert_eq!(fields.number("amount"), Some(3.5));
        assert_eq!(fields.date("date"), Some(today()));
    }

    #[test]
    fn test_expense_reasons() {
        let missing_title = RawRow::new().with("amount", 5.0).with("category", "Food");
        assert_eq!(
            reason(validate(&EXPENSE_SCHEMA, &missing_title, today())),
            "Missing title"
        );

        let bad_amount = RawRow::new()
            .with("title", "Lunch")
            .with("amount", "twelve")
            .with("category", "Food");
        assert_eq!(
            reason(validate(&EXPENSE_SCHEMA, &bad_amount, today())),
            "Invalid or missing amount"
        );

        let missing_category = RawRow::new().with("title", "Lunch").with("amount", 12.0);
        assert_eq!(
            reason(validate(&EXPENSE_SCHEMA, &missing_category, today())),
            "Missing category"
        );

        let bad_date = RawRow::new()
            .with("title", "Lunch")
            .with("amount", 12.0)
            .with("category", "Food")
            .with("date", "15/06/2025");
        assert_eq!(
            reason(validate(&EXPENSE_SCHEMA, &bad_date, today())),
            "Invalid date format (YYYY-MM-DD expected)"
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Title is checked before amount and date
        let row = RawRow::new()
            .with("title", "  ")
            .with("amount", "abc")
            .with("date", "nope");
        assert_eq!(reason(validate(&EXPENSE_SCHEMA, &row, today())), "Missing title");
    }

    #[test]
    fn test_income_requires_date() {
        let row = RawRow::new().with("source", "Salary").with("amount", 1000.0);
        assert_eq!(
            reason(validate(&INCOME_SCHEMA, &row, today())),
            "Missing or invalid date (YYYY-MM-DD expected)"
        );

        let row = row.with("date", "2025-13-01");
        assert_eq!(
            reason(validate(&INCOME_SCHEMA, &row, today())),
            "Missing or invalid date (YYYY-MM-DD expected)"
        );
    }

    #[test]
    fn test_income_missing_source() {
        let row = RawRow::new().with("amount", 10.0).with("date", "2025-01-01");
        assert_eq!(reason(validate(&INCOME_SCHEMA, &row, today())), "Missing source");
    }

    #[test]
    fn test_numeric_title_is_accepted_as_text() {
        let row = RawRow::new()
            .with("title", 1234.0)
            .with("amount", 1.0)
            .with("category", "Misc");
        let fields = validate(&EXPENSE_SCHEMA, &row, today()).unwrap();
        assert_eq!(fields.text("title"), Some("1234"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&RawValue::Number(12.5)), Some(12.5));
        assert_eq!(parse_amount(&RawValue::Text(" 7 ".into())), Some(7.0));
        assert_eq!(parse_amount(&RawValue::Text("-2.25".into())), Some(-2.25));
        assert_eq!(parse_amount(&RawValue::Text("1e3".into())), Some(1000.0));
        assert_eq!(parse_amount(&RawValue::Text("NaN".into())), None);
        assert_eq!(parse_amount(&RawValue::Text("inf".into())), None);
        assert_eq!(parse_amount(&RawValue::Number(f64::NAN)), None);
        assert_eq!(parse_amount(&RawValue::Text("$5".into())), None);
        assert_eq!(parse_amount(&RawValue::Absent), None);
    }

    #[test]
    fn test_parse_date_is_strict() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15);
        assert_eq!(parse_date(&RawValue::Text("2025-01-15".into())), expected);
        assert_eq!(parse_date(&RawValue::Text("01/15/2025".into())), None);
        assert_eq!(parse_date(&RawValue::Text("2025-02-30".into())), None);
        assert_eq!(parse_date(&RawValue::Text("2025-01-15T10:00:00".into())), None);
        assert_eq!(parse_date(&RawValue::Number(45000.0)), None);
    }

    #[test]
    fn test_patch_checks_only_given_fields() {
        let patch = RawRow::new().with("amount", "9.99");
        let fields = validate_patch(&EXPENSE_SCHEMA, &patch).unwrap();

        assert_eq!(fields.number("amount"), Some(9.99));
        assert!(fields.text("title").is_none());
        assert!(fields.date("date").is_none());
    }

    #[test]
    fn test_patch_rejects_blank_required_field() {
        let patch = RawRow::new().with("title", "");
        assert_eq!(reason(validate_patch(&EXPENSE_SCHEMA, &patch)), "Missing title");

        let patch = RawRow::new().with("amount", "oops");
        assert_eq!(
            reason(validate_patch(&INCOME_SCHEMA, &patch)),
            "Invalid or missing amount"
        );
    }

    #[test]
    fn test_patch_blank_expense_date_is_ignored() {
        let patch = RawRow::new().with("date", RawValue::Absent);
        let fields = validate_patch(&EXPENSE_SCHEMA, &patch).unwrap();
        assert!(fields.is_empty());

        let patch = RawRow::new().with("date", "");
        assert_eq!(
            reason(validate_patch(&INCOME_SCHEMA, &patch)),
            "Missing or invalid date (YYYY-MM-DD expected)"
        );
    }

    #[test]
    fn test_patch_ignores_unknown_and_id_columns() {
        let patch = RawRow::new().with("id", 1.0).with("notes", "x");
        let fields = validate_patch(&EXPENSE_SCHEMA, &patch).unwrap();
        assert!(fields.is_empty());
    }
}
