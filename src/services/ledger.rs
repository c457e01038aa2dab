//! Ledger service
//!
//! The record store contract for one entity type: list, get, create,
//! update, delete, bulk create/import and totals. Every call runs its own
//! load → mutate → save cycle under the collection lock; failures never
//! leave a partial write behind.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use log::{info, warn};

use crate::error::{TallyError, TallyResult};
use crate::import;
use crate::models::{Expense, Income, RawRow, Record, RecordId};
use crate::storage::{Collection, Storage, Stored};
use crate::validation::{validate, validate_patch};

use super::query::{RecordFilter, Totals};

/// Result of an all-or-nothing batch insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    /// Every row was valid; this many records were appended
    Added(usize),
    /// At least one row failed; nothing was written. One `"Row N: reason"`
    /// message per failing row, N counting data rows from 1.
    Rejected(Vec<String>),
}

/// Service for one record type's collection
pub struct LedgerService<'a, R> {
    storage: &'a Storage,
    collection: &'a Collection<R>,
}

pub type ExpenseService<'a> = LedgerService<'a, Expense>;
pub type IncomeService<'a> = LedgerService<'a, Income>;

impl<'a, R: Stored> LedgerService<'a, R> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            collection: R::collection(storage),
        }
    }

    /// List records in insertion order, optionally filtered
    pub fn list(&self, filter: &RecordFilter) -> TallyResult<Vec<R>> {
        let records = self.collection.lock()?.load()?;
        Ok(filter.apply(records))
    }

    /// Get one record by ID
    pub fn get(&self, id: RecordId) -> TallyResult<R> {
        self.collection
            .lock()?
            .load()?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| TallyError::not_found(R::ENTITY, id))
    }

    /// Validate and append a new record
    pub fn create(&self, fields: &RawRow) -> TallyResult<R> {
        let normalized = validate(R::schema(), fields, today())?;

        let locked = self.collection.lock()?;
        let mut records = locked.load()?;

        let record = R::from_normalized(self.issue_id(&records)?, &normalized)?;
        records.push(record.clone());
        locked.save(&records)?;

        info!("Created {} {}", R::ENTITY, record.id());
        Ok(record)
    }

    /// Replace the fields present in `patch`, keeping everything else
    pub fn update(&self, id: RecordId, patch: &RawRow) -> TallyResult<R> {
        let locked = self.collection.lock()?;
        let mut records = locked.load()?;

        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| TallyError::not_found(R::ENTITY, id))?;

        let normalized = validate_patch(R::schema(), patch)?;
        record.apply_patch(&normalized);
        let updated = record.clone();

        locked.save(&records)?;

        info!("Updated {} {}", R::ENTITY, id);
        Ok(updated)
    }

    /// Remove a record; the document is not rewritten when nothing matches
    pub fn delete(&self, id: RecordId) -> TallyResult<()> {
        let locked = self.collection.lock()?;
        let mut records = locked.load()?;

        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| TallyError::not_found(R::ENTITY, id))?;

        records.remove(position);
        locked.save(&records)?;

        info!("Deleted {} {}", R::ENTITY, id);
        Ok(())
    }

    /// Insert a batch of rows, all or nothing
    ///
    /// Every row is validated before anything is written, and every failing
    /// row is reported so a caller can fix the whole file in one pass.
    pub fn bulk_create(&self, rows: &[RawRow]) -> TallyResult<BulkOutcome> {
        let today = today();
        let mut valid = Vec::with_capacity(rows.len());
        let mut errors = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            match validate(R::schema(), row, today) {
                Ok(normalized) => valid.push(normalized),
                Err(TallyError::Validation(reason)) => {
                    errors.push(format!("Row {}: {}", idx + 1, reason))
                }
                Err(other) => return Err(other),
            }
        }

        if !errors.is_empty() {
            warn!(
                "Rejected {} batch: {} of {} row(s) invalid",
                R::ENTITY,
                errors.len(),
                rows.len()
            );
            return Ok(BulkOutcome::Rejected(errors));
        }

        if valid.is_empty() {
            return Ok(BulkOutcome::Added(0));
        }

        let locked = self.collection.lock()?;
        let mut records = locked.load()?;

        let mut new_records = Vec::with_capacity(valid.len());
        for normalized in &valid {
            new_records.push(R::from_normalized(self.issue_id(&records)?, normalized)?);
        }

        let added = new_records.len();
        records.extend(new_records);
        locked.save(&records)?;

        info!("Imported {} {} record(s)", added, R::ENTITY);
        Ok(BulkOutcome::Added(added))
    }

    /// Decode a csv/xls/xlsx file and insert its rows, all or nothing
    pub fn bulk_import(&self, path: &Path) -> TallyResult<BulkOutcome> {
        let rows = import::decode_file(path)?;
        self.bulk_create(&rows)
    }

    /// Sum and count of the records matching the filter
    pub fn total(&self, filter: &RecordFilter) -> TallyResult<Totals> {
        let records = self.list(filter)?;
        Ok(Totals::of(&records))
    }

    /// Distinct labels (categories or sources) in first-seen order
    pub fn labels(&self) -> TallyResult<Vec<String>> {
        let records = self.collection.lock()?.load()?;

        let mut labels: Vec<String> = Vec::new();
        for record in &records {
            if !labels.iter().any(|l| l == record.label()) {
                labels.push(record.label().to_string());
            }
        }
        Ok(labels)
    }

    /// Next id, guaranteed above every id already in the collection
    fn issue_id(&self, records: &[R]) -> TallyResult<RecordId> {
        let ids = self.storage.ids();
        if let Some(max) = records.iter().map(Record::id).max() {
            ids.observe(max);
        }
        ids.next_id()
    }
}

/// The ingestion day used for defaulted dates
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
