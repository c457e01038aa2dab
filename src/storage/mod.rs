//! Storage layer for Tally
//!
//! Provides JSON document storage with atomic writes, one lock per
//! collection, and automatic directory creation.

pub mod collection;
pub mod file_io;

pub use collection::{Collection, LockedCollection, FORMAT_VERSION};
pub use file_io::{read_json, write_json_atomic};

use crate::config::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::{Expense, IdGenerator, Income, Record};

/// Main storage coordinator that owns both collections
///
/// Lives for the whole process; share it by reference.
pub struct Storage {
    paths: TallyPaths,
    pub expenses: Collection<Expense>,
    pub incomes: Collection<Income>,
    ids: IdGenerator,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: Collection::new(paths.expenses_file()),
            incomes: Collection::new(paths.incomes_file()),
            ids: IdGenerator::new(),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    /// Process-wide record id generator
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }
}

/// A record type with a collection in `Storage`
pub trait Stored: Record {
    fn collection(storage: &Storage) -> &Collection<Self>;
}

impl Stored for Expense {
    fn collection(storage: &Storage) -> &Collection<Self> {
        &storage.expenses
    }
}

impl Stored for Income {
    fn collection(storage: &Storage) -> &Collection<Self> {
        &storage.incomes
    }
}
