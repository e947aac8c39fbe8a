//! Typed access to raw CSV cells.
//!
//! Structural problems (missing cell, non-numeric number, unknown Yes/No)
//! are fatal load errors. Dates are the exception: an unparseable date is
//! logged and comes back as `None`.

use chrono::{NaiveDate, NaiveDateTime};
use hrlens_core::{Attrition, HrError};
use tracing::warn;

use crate::csv_table::ColumnIndex;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Parse a calendar date in any of the accepted source formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Cell accessor bound to one table row.
pub struct RowReader<'a> {
    columns: &'a ColumnIndex,
    row: &'a [Option<String>],
    /// 1-based data row number, for error messages.
    line: usize,
}

impl<'a> RowReader<'a> {
    pub fn new(columns: &'a ColumnIndex, row: &'a [Option<String>], line: usize) -> Self {
        Self { columns, row, line }
    }

    fn invalid(&self, column: &str, value: &str) -> HrError {
        HrError::InvalidValue {
            table: self.columns.table().to_string(),
            row: self.line,
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn text(&self, column: &str) -> Result<String, HrError> {
        self.columns
            .cell(self.row, column)
            .map(str::to_owned)
            .ok_or_else(|| self.invalid(column, ""))
    }

    pub fn number(&self, column: &str) -> Result<f64, HrError> {
        let raw = self
            .columns
            .cell(self.row, column)
            .ok_or_else(|| self.invalid(column, ""))?;
        raw.replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(column, raw))
    }

    /// Small non-negative integer codes (ordinal scales, stock option level).
    pub fn code(&self, column: &str) -> Result<u8, HrError> {
        let raw = self
            .columns
            .cell(self.row, column)
            .ok_or_else(|| self.invalid(column, ""))?;
        raw.parse::<u8>()
            .or_else(|_| {
                // Some exports write integer codes as floats ("3.0").
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.fract() == 0.0 && (0.0..=255.0).contains(v))
                    .map(|v| v as u8)
                    .ok_or(())
            })
            .map_err(|_| self.invalid(column, raw))
    }

    pub fn yes_no(&self, column: &str) -> Result<bool, HrError> {
        self.attrition(column).map(Attrition::has_left)
    }

    pub fn attrition(&self, column: &str) -> Result<Attrition, HrError> {
        let raw = self
            .columns
            .cell(self.row, column)
            .ok_or_else(|| self.invalid(column, ""))?;
        raw.parse::<Attrition>().map_err(|_| self.invalid(column, raw))
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        let raw = self.columns.cell(self.row, column)?;
        let parsed = parse_date(raw);
        if parsed.is_none() {
            warn!(
                table = self.columns.table(),
                row = self.line,
                column,
                value = raw,
                "unparseable date, treating as missing"
            );
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_and_us_dates() {
        let expected = NaiveDate::from_ymd_opt(2013, 1, 2).unwrap();
        assert_eq!(parse_date("2013-01-02"), Some(expected));
        assert_eq!(parse_date("1/2/2013"), Some(expected));
        assert_eq!(parse_date("2013-01-02 00:00:00"), Some(expected));
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2013-13-45"), None);
    }
}
