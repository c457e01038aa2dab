//! Record identity
//!
//! Records are keyed by a 64-bit integer derived from the wall clock in
//! milliseconds. `IdGenerator` hands them out from a process-local atomic so
//! two records created within the same millisecond still get distinct ids.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};

/// Identifier of a single ledger record, unique within its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw id value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw id value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Issues monotonically increasing record ids
///
/// Each id is `max(now_ms, last + 1)`, so ids track the wall clock while it
/// moves forward and never repeat when it doesn't. Once `i64::MAX` has been
/// issued or observed, no further ids are handed out.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator seeded from the wall clock on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that will never issue an id at or below `floor`
    pub fn starting_after(floor: i64) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    /// Issue the next id
    ///
    /// # Errors
    ///
    /// Returns a storage error when the id space is exhausted.
    pub fn next_id(&self) -> TallyResult<RecordId> {
        let now = Utc::now().timestamp_millis();
        let bump = |last: i64| last.checked_add(1).map(|next| now.max(next));

        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, bump)
            .map_err(|_| exhausted())?;

        bump(previous).map(RecordId).ok_or_else(exhausted)
    }

    /// Make sure future ids are greater than an id already in use
    pub fn observe(&self, id: RecordId) {
        self.last.fetch_max(id.0, Ordering::SeqCst);
    }
}

fn exhausted() -> TallyError {
    TallyError::Storage("record id space exhausted".to_string())
}
