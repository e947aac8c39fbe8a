use std::collections::HashMap;
use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use hrlens_core::HrError;
use tracing::info;

/// A CSV file read as untyped text cells.
///
/// Every column is loaded as nullable UTF-8 so typing decisions stay with
/// the caller. Empty and placeholder cells (`None`, `null`, `NaN`) are `None`.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Read a CSV file with a header row.
    pub fn read(path: &Path, name: &str) -> Result<Self, HrError> {
        let mut file = File::open(path).map_err(HrError::Io)?;

        let (inferred, _) = Format::default()
            .with_header(true)
            .infer_schema(&mut file, Some(0))
            .map_err(|e| HrError::Csv(e.to_string()))?;
        let headers: Vec<String> = inferred
            .fields()
            .iter()
            .map(|f| f.name().trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let schema = Arc::new(Schema::new(
            inferred
                .fields()
                .iter()
                .map(|f| Field::new(f.name(), DataType::Utf8, true))
                .collect::<Vec<_>>(),
        ));

        file.rewind().map_err(HrError::Io)?;
        let reader = ReaderBuilder::new(schema)
            .with_header(true)
            .build(file)
            .map_err(|e| HrError::Csv(e.to_string()))?;

        let mut rows = Vec::new();
        for batch_result in reader {
            let batch = batch_result.map_err(|e| HrError::Csv(e.to_string()))?;

            let columns: Vec<&StringArray> = (0..batch.num_columns())
                .map(|i| {
                    batch
                        .column(i)
                        .as_any()
                        .downcast_ref::<StringArray>()
                        .ok_or_else(|| HrError::Csv(format!("column {} is not UTF-8", i)))
                })
                .collect::<Result<_, _>>()?;

            for row_idx in 0..batch.num_rows() {
                let row = columns
                    .iter()
                    .map(|arr| {
                        if arr.is_null(row_idx) {
                            return None;
                        }
                        let val = arr.value(row_idx).trim();
                        if val.is_empty() || val == "None" || val == "null" || val == "NaN" {
                            None
                        } else {
                            Some(val.to_string())
                        }
                    })
                    .collect();
                rows.push(row);
            }
        }

        info!(table = name, rows = rows.len(), path = %path.display(), "read CSV table");
        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    /// Resolve required column names to indices. A missing column is fatal.
    pub fn require_columns(&self, required: &[&str]) -> Result<ColumnIndex, HrError> {
        let mut index = HashMap::with_capacity(required.len());
        for &column in required {
            let pos = self
                .headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| HrError::MissingColumn {
                    table: self.name.clone(),
                    column: column.to_string(),
                })?;
            index.insert(column.to_string(), pos);
        }
        Ok(ColumnIndex {
            table: self.name.clone(),
            index,
        })
    }
}

/// Name → position lookup for columns validated by [`RawTable::require_columns`].
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    table: String,
    index: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Cell text for a required column; `None` when the cell is empty.
    pub fn cell<'a>(&self, row: &'a [Option<String>], column: &str) -> Option<&'a str> {
        self.index
            .get(column)
            .and_then(|&i| row.get(i))
            .and_then(|c| c.as_deref())
    }
}
