//! Tally - income and expense tracking from the terminal
//!
//! This library provides the core functionality for the Tally ledger. It
//! keeps two collections of records, expenses and incomes, in JSON documents
//! on disk, validates every record on the way in, and imports whole
//! spreadsheets as all-or-nothing batches.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records, ids, raw rows and field schemas
//! - `validation`: Field validation and normalization
//! - `import`: CSV and Excel row decoding
//! - `storage`: JSON file storage layer
//! - `services`: Record store and filtering
//! - `reports`: Income versus expense summary
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::paths::TallyPaths;
//! use tally::models::RawRow;
//! use tally::services::ExpenseService;
//! use tally::storage::Storage;
//!
//! let storage = Storage::new(TallyPaths::new()?)?;
//! let expense = ExpenseService::new(&storage).create(
//!     &RawRow::new()
//!         .with("title", "Coffee")
//!         .with("amount", "3.50")
//!         .with("category", "Food"),
//! )?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod import;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::TallyError;
