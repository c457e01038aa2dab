//! Collection repository for JSON storage
//!
//! Each record type lives in one JSON document holding the whole ordered
//! collection. Every operation runs a full load → mutate → save cycle while
//! holding the collection's lock, so two writers in one process can never
//! interleave their cycles and lose each other's changes.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};
use crate::models::Record;

use super::file_io::{read_json, write_json_atomic};

/// Version written into every collection document
pub const FORMAT_VERSION: u32 = 1;

/// On-disk layouts accepted when loading
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCollection<R> {
    Versioned { version: u32, records: Vec<R> },
    /// Bare array written before the version marker existed
    Legacy(Vec<R>),
}

impl<R> Default for StoredCollection<R> {
    fn default() -> Self {
        Self::Legacy(Vec::new())
    }
}

#[derive(Serialize)]
struct CollectionDocument<'a, R> {
    version: u32,
    records: &'a [R],
}

/// Repository for one record type's collection document
pub struct Collection<R> {
    path: PathBuf,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> R>,
}

impl<R: Record> Collection<R> {
    /// Create a repository backed by the given file (created on first save)
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Enter the collection's exclusive region
    ///
    /// Loading and saving are only reachable through the returned guard.
    pub fn lock(&self) -> TallyResult<LockedCollection<'_, R>> {
        let guard = self.lock.lock().map_err(|e| {
            TallyError::Storage(format!("Failed to acquire {} lock: {}", R::ENTITY, e))
        })?;

        Ok(LockedCollection {
            path: &self.path,
            _guard: guard,
            _records: PhantomData,
        })
    }
}

/// A collection held under its lock
pub struct LockedCollection<'a, R> {
    path: &'a Path,
    _guard: MutexGuard<'a, ()>,
    _records: PhantomData<fn() -> R>,
}

impl<R: Record> LockedCollection<'_, R> {
    /// Load every record in stored order; a missing document is empty
    pub fn load(&self) -> TallyResult<Vec<R>> {
        let records = match read_json::<StoredCollection<R>, _>(self.path)? {
            StoredCollection::Versioned { version, records } => {
                if version > FORMAT_VERSION {
                    return Err(TallyError::Storage(format!(
                        "{} uses format version {}, newest supported is {}",
                        self.path.display(),
                        version,
                        FORMAT_VERSION
                    )));
                }
                records
            }
            StoredCollection::Legacy(records) => {
                if !records.is_empty() {
                    warn!(
                        "{} has no version marker; it will be upgraded on the next write",
                        self.path.display()
                    );
                }
                records
            }
        };

        debug!("Loaded {} {} record(s)", records.len(), R::ENTITY);
        Ok(records)
    }

    /// Rewrite the whole document
    pub fn save(&self, records: &[R]) -> TallyResult<()> {
        let document = CollectionDocument {
            version: FORMAT_VERSION,
            records,
        };
        write_json_atomic(self.path, &document)?;

        debug!("Saved {} {} record(s)", records.len(), R::ENTITY);
        Ok(())
    }
}
