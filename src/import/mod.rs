//! Tabular row decoding
//!
//! Reads CSV and Excel files into `RawRow`s keyed by the header row.
//! Row order is preserved and fully blank rows are skipped, so row numbers
//! reported by the validator count data rows only (1 = first data row).

mod delimited;
mod workbook;

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::error::{TallyError, TallyResult};
use crate::models::RawRow;

pub use delimited::decode_csv;
pub use workbook::{decode_xls, decode_xlsx, excel_serial_to_date};

/// Supported tabular file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Csv,
    Xls,
    Xlsx,
}

impl TabularFormat {
    /// Resolve a file extension (case-insensitive, leading dot optional)
    pub fn from_extension(ext: &str) -> TallyResult<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xls" => Ok(Self::Xls),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(TallyError::UnsupportedFormat(if other.is_empty() {
                "(no extension)".to_string()
            } else {
                other.to_string()
            })),
        }
    }

    /// Resolve the format of a file from its name
    pub fn from_path(path: &Path) -> TallyResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for TabularFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decode rows from an open file of a known format
pub fn decode<R: Read + Seek>(reader: R, format: TabularFormat) -> TallyResult<Vec<RawRow>> {
    let rows = match format {
        TabularFormat::Csv => decode_csv(reader)?,
        TabularFormat::Xls => decode_xls(reader)?,
        TabularFormat::Xlsx => decode_xlsx(reader)?,
    };

    log::debug!("Decoded {} {} row(s)", rows.len(), format);
    Ok(rows)
}

/// Decode rows from a file on disk, rejecting unsupported extensions first
pub fn decode_file(path: &Path) -> TallyResult<Vec<RawRow>> {
    let format = TabularFormat::from_path(path)?;

    let file = File::open(path)
        .map_err(|e| TallyError::Decode(format!("{}: {}", path.display(), e)))?;

    decode(BufReader::new(file), format)
}
