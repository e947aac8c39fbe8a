//! CSV ingestion for the employee and performance-review tables.
//!
//! Reads both files through `arrow::csv` as text columns, validates the
//! required columns, parses typed fields and performs the inner join on
//! `EmployeeID`. Structural problems fail the load; bad dates do not.

pub mod csv_table;
pub mod join;
pub mod loader;
pub mod parse;

pub use csv_table::RawTable;
pub use join::{join_tables, EMPLOYEE_COLUMNS, PERFORMANCE_COLUMNS};
pub use loader::DatasetLoader;
