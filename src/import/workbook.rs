//! Excel decoding (xls and xlsx)
//!
//! Only the first worksheet is read. Its first non-empty row supplies the
//! column names. Numeric cells stay numbers; date cells become
//! `YYYY-MM-DD` text so they validate like CSV dates.

use std::fmt::Display;
use std::io::{Read, Seek};

use calamine::{Data, Reader, Xls, Xlsx};
use chrono::{Days, NaiveDate};

use crate::error::{TallyError, TallyResult};
use crate::models::{RawRow, RawValue};

/// Decode the first sheet of an `.xlsx` workbook
pub fn decode_xlsx<R: Read + Seek>(reader: R) -> TallyResult<Vec<RawRow>> {
    let workbook: Xlsx<R> = Xlsx::new(reader).map_err(decode_error)?;
    decode_workbook(workbook)
}

/// Decode the first sheet of a legacy `.xls` workbook
pub fn decode_xls<R: Read + Seek>(reader: R) -> TallyResult<Vec<RawRow>> {
    let workbook: Xls<R> = Xls::new(reader).map_err(decode_error)?;
    decode_workbook(workbook)
}

fn decode_workbook<RS, W>(mut workbook: W) -> TallyResult<Vec<RawRow>>
where
    RS: Read + Seek,
    W: Reader<RS>,
    W::Error: Display,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TallyError::Decode("workbook contains no sheets".into()))?
        .map_err(decode_error)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => return Ok(Vec::new()),
    };

    let mut decoded = Vec::new();
    for cells in rows {
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = cells.get(idx).map(cell_value).unwrap_or(RawValue::Absent);
                (header.clone(), value)
            })
            .collect();

        if !row.is_blank() {
            decoded.push(row);
        }
    }

    Ok(decoded)
}

fn decode_error(err: impl Display) -> TallyError {
    TallyError::Decode(err.to_string())
}

fn header_text(cell: &Data) -> String {
    match cell_value(cell).as_text() {
        Some(text) => text,
        None => String::new(),
    }
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Absent,
        Data::String(s) => RawValue::from_cell_text(s),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match excel_serial_to_date(dt.as_f64()) {
            Some(date) => RawValue::Text(date.format("%Y-%m-%d").to_string()),
            None => RawValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => {
            // "2025-01-15T00:00:00" -> "2025-01-15"
            let date_part = s.get(..10).unwrap_or(s);
            match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                Ok(date) => RawValue::Text(date.format("%Y-%m-%d").to_string()),
                Err(_) => RawValue::from_cell_text(s),
            }
        }
        Data::DurationIso(s) => RawValue::from_cell_text(s),
    }
}

/// Convert an Excel serial day number (1900 date system) to a date
///
/// Serial 1 is 1900-01-01. Excel counts a 1900-02-29 that never existed as
/// serial 60, so that serial has no date and later serials shift back a day.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }

    let day = serial.floor();
    let base = if (1.0..60.0).contains(&day) {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else if day >= 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    } else {
        return None;
    };

    base.checked_add_days(Days::new(day as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(
            excel_serial_to_date(45672.0),
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
        // Time of day is dropped
        assert_eq!(
            excel_serial_to_date(45672.75),
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
        assert_eq!(excel_serial_to_date(-1.0), None);
        assert_eq!(excel_serial_to_date(0.5), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn test_serials_around_1900_leap_day() {
        assert_eq!(excel_serial_to_date(1.0), NaiveDate::from_ymd_opt(1900, 1, 1));
        assert_eq!(excel_serial_to_date(59.0), NaiveDate::from_ymd_opt(1900, 2, 28));
        assert_eq!(excel_serial_to_date(60.0), None);
        assert_eq!(excel_serial_to_date(61.0), NaiveDate::from_ymd_opt(1900, 3, 1));
    }

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_value(&Data::Empty), RawValue::Absent);
        assert_eq!(cell_value(&Data::Float(3.5)), RawValue::Number(3.5));
        assert_eq!(cell_value(&Data::Int(12)), RawValue::Number(12.0));
        assert_eq!(
            cell_value(&Data::String(" Food ".into())),
            RawValue::Text("Food".into())
        );
        assert_eq!(cell_value(&Data::String("   ".into())), RawValue::Absent);
        assert_eq!(
            cell_value(&Data::DateTimeIso("2025-01-15T00:00:00".into())),
            RawValue::Text("2025-01-15".into())
        );
    }

    #[test]
    fn test_numeric_header_text() {
        assert_eq!(header_text(&Data::Float(2025.0)), "2025");
        assert_eq!(header_text(&Data::String("amount".into())), "amount");
        assert_eq!(header_text(&Data::Empty), "");
    }
}
