//! Core data models for Tally
//!
//! This module contains the ledger records (expenses and incomes), their
//! identifiers, the field schemas they are validated against, and the row
//! types that carry raw input into the validator.

pub mod expense;
pub mod ids;
pub mod income;
pub mod record;
pub mod row;
pub mod schema;

pub use expense::{Expense, EXPENSE_SCHEMA};
pub use ids::{IdGenerator, RecordId};
pub use income::{Income, INCOME_SCHEMA};
pub use record::Record;
pub use row::{FieldValue, NormalizedRow, RawRow, RawValue};
pub use schema::{FieldKind, FieldSpec, Schema, WhenAbsent};
