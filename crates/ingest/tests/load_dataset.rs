use std::path::PathBuf;

use hrlens_core::{Attrition, HrError};
use hrlens_ingest::DatasetLoader;

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample")
}

#[test]
fn loads_and_joins_sample_tables() {
    let dir = sample_dir();
    let ds = DatasetLoader::load_paths(
        &dir.join("Employee.csv"),
        &dir.join("PerformanceRating.csv"),
    )
    .unwrap();

    // E12 has no reviews and E99 has no employee row.
    assert_eq!(ds.len(), 15);
    assert_eq!(ds.employee_count(), 10);
    assert!(ds.records().iter().all(|r| r.employee_id != "E12"));
    assert!(ds.records().iter().all(|r| r.employee_id != "E99"));

    let first = &ds.records()[0];
    assert_eq!(first.employee_id, "E01");
    assert_eq!(first.department, "Technology");
    assert_eq!(first.distance_from_home_km, 4.0);
    assert_eq!(first.attrition, Attrition::No);
    assert!(!first.overtime);

    // Reviews stay in performance-table order within an employee.
    let e01: Vec<u8> = ds
        .records()
        .iter()
        .filter(|r| r.employee_id == "E01")
        .map(|r| r.job_satisfaction)
        .collect();
    assert_eq!(e01, vec![4, 5]);
}

#[test]
fn unparseable_dates_become_missing() {
    let dir = sample_dir();
    let ds = DatasetLoader::load_paths(
        &dir.join("Employee.csv"),
        &dir.join("PerformanceRating.csv"),
    )
    .unwrap();

    let e09 = ds.records().iter().find(|r| r.employee_id == "E09").unwrap();
    assert_eq!(e09.hire_date, None);

    // US-style review date on E03's first review.
    let e03 = ds.records().iter().find(|r| r.employee_id == "E03").unwrap();
    assert_eq!(e03.review_year(), Some(2020));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = sample_dir();
    let err = DatasetLoader::load_paths(
        &dir.join("does-not-exist.csv"),
        &dir.join("PerformanceRating.csv"),
    )
    .unwrap_err();
    assert!(matches!(err, HrError::Io(_)));
}
