//! Field schemas
//!
//! A schema lists a record's input fields in validation order, with each
//! field's type, what happens when it is absent, and the reason strings
//! shown to users when it fails.

/// The type a raw value must parse into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
}

/// What to do when a field is missing or blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenAbsent {
    /// The field is required
    Reject,
    /// Substitute the ingestion day (date fields only)
    Today,
}

/// One field of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub when_absent: WhenAbsent,
    /// Reason reported when a required field is absent
    pub missing: &'static str,
    /// Reason reported when a present value fails to parse
    pub invalid: &'static str,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        self.when_absent == WhenAbsent::Reject
    }
}

/// Field schema of one record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
}

pub const AMOUNT_REASON: &str = "Invalid or missing amount";

/// Amount field shared by both record types
pub const AMOUNT_FIELD: FieldSpec = FieldSpec {
    name: "amount",
    kind: FieldKind::Number,
    when_absent: WhenAbsent::Reject,
    missing: AMOUNT_REASON,
    invalid: AMOUNT_REASON,
};
