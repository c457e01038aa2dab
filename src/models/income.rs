//! Income model
//!
//! Unlike expenses, an income must carry its own date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::RecordId;
use super::record::Record;
use super::row::NormalizedRow;
use super::schema::{FieldKind, FieldSpec, Schema, WhenAbsent, AMOUNT_FIELD};
use crate::error::TallyResult;

const INCOME_DATE_REASON: &str = "Missing or invalid date (YYYY-MM-DD expected)";

static INCOME_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        name: "source",
        kind: FieldKind::Text,
        when_absent: WhenAbsent::Reject,
        missing: "Missing source",
        invalid: "Missing source",
    },
    AMOUNT_FIELD,
    FieldSpec {
        name: "date",
        kind: FieldKind::Date,
        when_absent: WhenAbsent::Reject,
        missing: INCOME_DATE_REASON,
        invalid: INCOME_DATE_REASON,
    },
];

/// Income field schema: source, amount, date (all required)
pub static INCOME_SCHEMA: Schema = Schema {
    fields: &INCOME_FIELDS,
};

/// Money received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: RecordId,
    pub source: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Record for Income {
    const ENTITY: &'static str = "Income";
    const LABEL_FIELD: &'static str = "source";

    fn schema() -> &'static Schema {
        &INCOME_SCHEMA
    }

    fn from_normalized(id: RecordId, fields: &NormalizedRow) -> TallyResult<Self> {
        Ok(Self {
            id,
            source: fields.require_text("source")?.to_string(),
            amount: fields.require_number("amount")?,
            date: fields.require_date("date")?,
        })
    }

    fn apply_patch(&mut self, fields: &NormalizedRow) {
        if let Some(source) = fields.text("source") {
            self.source = source.to_string();
        }
        if let Some(amount) = fields.number("amount") {
            self.amount = amount;
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
        &self.source
    }
}
