//! CSV decoding

use std::io::Read;

use csv::{ReaderBuilder, Trim};

use crate::error::TallyResult;
use crate::models::{RawRow, RawValue};

/// Decode a CSV stream whose first record is the header row
///
/// Short records leave their trailing columns absent; extra fields past the
/// header are dropped.
pub fn decode_csv<R: Read>(reader: R) -> TallyResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;

        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = record
                    .get(idx)
                    .map(RawValue::from_cell_text)
                    .unwrap_or(RawValue::Absent);
                (header.clone(), value)
            })
            .collect();

        if !row.is_blank() {
            rows.push(row);
        }
    }

    Ok(rows)
}
