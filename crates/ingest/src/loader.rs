use std::path::Path;

use hrlens_core::config::DataConfig;
use hrlens_core::{Dataset, HrError};
use tracing::info;

use crate::csv_table::RawTable;
use crate::join::join_tables;

/// Loads the two source CSVs and joins them into a [`Dataset`].
pub struct DatasetLoader;

impl DatasetLoader {
    pub fn load(config: &DataConfig) -> Result<Dataset, HrError> {
        Self::load_paths(&config.employee_csv, &config.performance_csv)
    }

    pub fn load_paths(employee_csv: &Path, performance_csv: &Path) -> Result<Dataset, HrError> {
        let employees = RawTable::read(employee_csv, "employee")?;
        let performance = RawTable::read(performance_csv, "performance")?;
        let dataset = Dataset::new(join_tables(&employees, &performance)?);
        info!(
            rows = dataset.len(),
            employees = dataset.employee_count(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}
