//! Expense model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::RecordId;
use super::record::Record;
use super::row::NormalizedRow;
use super::schema::{FieldKind, FieldSpec, Schema, WhenAbsent, AMOUNT_FIELD};
use crate::error::TallyResult;

static EXPENSE_FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        name: "title",
        kind: FieldKind::Text,
        when_absent: WhenAbsent::Reject,
        missing: "Missing title",
        invalid: "Missing title",
    },
    AMOUNT_FIELD,
    FieldSpec {
        name: "category",
        kind: FieldKind::Text,
        when_absent: WhenAbsent::Reject,
        missing: "Missing category",
        invalid: "Missing category",
    },
    FieldSpec {
        name: "date",
        kind: FieldKind::Date,
        when_absent: WhenAbsent::Today,
        missing: "Invalid date format (YYYY-MM-DD expected)",
        invalid: "Invalid date format (YYYY-MM-DD expected)",
    },
];

/// Expense field schema: title, amount, category, optional date
pub static EXPENSE_SCHEMA: Schema = Schema {
    fields: &EXPENSE_FIELDS,
};

/// Money spent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl Record for Expense {
    const ENTITY: &'static str = "Expense";
    const LABEL_FIELD: &'static str = "category";

    fn schema() -> &'static Schema {
        &EXPENSE_SCHEMA
    }

    fn from_normalized(id: RecordId, fields: &NormalizedRow) -> TallyResult<Self> {
        Ok(Self {
            id,
            title: fields.require_text("title")?.to_string(),
            amount: fields.require_number("amount")?,
            category: fields.require_text("category")?.to_string(),
            date: fields.require_date("date")?,
        })
    }

    fn apply_patch(&mut self, fields: &NormalizedRow) {
        if let Some(title) = fields.text("title") {
            self.title = title.to_string();
        }
        if let Some(amount) = fields.number("amount") {
            self.amount = amount;
        }
        if let Some(category) = fields.text("category") {
            self.category = category.to_string();
        }
        if let Some(date) = fields.date("date") {
            self.date = date;
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn label(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::row::FieldValue;

    fn coffee_fields() -> NormalizedRow {
        let mut fields = NormalizedRow::default();
        fields.push("title", FieldValue::Text("Coffee".into()));
        fields.push("amount", FieldValue::Number(3.5));
        fields.push("category", FieldValue::Text("Food".into()));
        fields.push(
            "date",
            FieldValue::Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
        );
        fields
    }

    #[test]
    fn test_from_normalized() {
        let expense = Expense::from_normalized(RecordId::new(7), &coffee_fields()).unwrap();
        assert_eq!(expense.id, RecordId::new(7));
        assert_eq!(expense.title, "Coffee");
        assert_eq!(expense.amount, 3.5);
        assert_eq!(expense.label(), "Food");
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut expense = Expense::from_normalized(RecordId::new(7), &coffee_fields()).unwrap();
        let mut patch = NormalizedRow::default();
        patch.push("amount", FieldValue::Number(4.25));

        expense.apply_patch(&patch);

        assert_eq!(expense.amount, 4.25);
        assert_eq!(expense.title, "Coffee");
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.id, RecordId::new(7));
    }

    #[test]
    fn test_serialization_shape() {
        let expense = Expense::from_normalized(RecordId::new(7), &coffee_fields()).unwrap();
        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["amount"], 3.5);
        assert_eq!(json["date"], "2025-03-01");

        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_schema_order() {
        let names: Vec<_> = EXPENSE_SCHEMA.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["title", "amount", "category", "date"]);
        let required: Vec<_> = EXPENSE_SCHEMA
            .fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name)
            .collect();
        assert_eq!(required, vec!["title", "amount", "category"]);
    }
}
