//! Common interface of ledger records

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use super::ids::RecordId;
use super::row::NormalizedRow;
use super::schema::Schema;
use crate::error::TallyResult;

/// A ledger entry type (expense or income)
///
/// The two record types share every operation and differ only in their
/// field schema and in which text field acts as the filter label.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Display name of the entity, used in errors and logs
    const ENTITY: &'static str;

    /// Name of the text field matched by label filters
    const LABEL_FIELD: &'static str;

    /// Input fields in validation order
    fn schema() -> &'static Schema;

    /// Build a record from validated fields
    fn from_normalized(id: RecordId, fields: &NormalizedRow) -> TallyResult<Self>;

    /// Overwrite the fields present in a validated patch
    fn apply_patch(&mut self, fields: &NormalizedRow);

    fn id(&self) -> RecordId;

    fn amount(&self) -> f64;

    fn date(&self) -> NaiveDate;

    /// Category for expenses, source for incomes
    fn label(&self) -> &str;
}
