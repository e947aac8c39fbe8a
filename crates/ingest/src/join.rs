//! Inner join of the employee and performance tables on `EmployeeID`.
//!
//! Output order follows the employee table; within an employee, reviews keep
//! their performance-table order. Downstream "last value" aggregation relies
//! on this order.

use std::collections::{HashMap, HashSet};

use hrlens_core::{EmployeeRecord, HrError};
use tracing::{debug, info};

use crate::csv_table::RawTable;
use crate::parse::RowReader;

pub const EMPLOYEE_ID: &str = "EmployeeID";

/// Columns the employee table must provide. Extra columns are ignored.
pub const EMPLOYEE_COLUMNS: &[&str] = &[
    EMPLOYEE_ID,
    "Gender",
    "Age",
    "Department",
    "DistanceFromHome (KM)",
    "State",
    "Education",
    "JobRole",
    "MaritalStatus",
    "Salary",
    "StockOptionLevel",
    "OverTime",
    "HireDate",
    "Attrition",
    "YearsAtCompany",
    "YearsInMostRecentRole",
    "YearsSinceLastPromotion",
    "YearsWithCurrManager",
];

/// Columns the performance table must provide.
pub const PERFORMANCE_COLUMNS: &[&str] =
    &[EMPLOYEE_ID, "ReviewDate", "JobSatisfaction", "ManagerRating"];

/// Employee-level fields, parsed once per employee row.
struct EmployeeRow {
    employee_id: String,
    department: String,
    gender: String,
    age: f64,
    marital_status: String,
    job_role: String,
    state: String,
    distance_from_home_km: f64,
    hire_date: Option<chrono::NaiveDate>,
    years_at_company: f64,
    years_since_last_promotion: f64,
    years_with_curr_manager: f64,
    years_in_most_recent_role: f64,
    salary: f64,
    stock_option_level: u8,
    education: u8,
    overtime: bool,
    attrition: hrlens_core::Attrition,
}

struct ReviewRow {
    review_date: Option<chrono::NaiveDate>,
    job_satisfaction: u8,
    manager_rating: f64,
}

fn parse_employees(table: &RawTable) -> Result<Vec<EmployeeRow>, HrError> {
    let cols = table.require_columns(EMPLOYEE_COLUMNS)?;
    let mut seen = HashSet::with_capacity(table.rows.len());
    let mut out = Vec::with_capacity(table.rows.len());

    for (i, row) in table.rows.iter().enumerate() {
        let r = RowReader::new(&cols, row, i + 1);
        let employee_id = r.text(EMPLOYEE_ID)?;
        if !seen.insert(employee_id.clone()) {
            return Err(HrError::DuplicateKey {
                table: table.name.clone(),
                key: employee_id,
            });
        }

        out.push(EmployeeRow {
            department: r.text("Department")?,
            gender: r.text("Gender")?,
            age: r.number("Age")?,
            marital_status: r.text("MaritalStatus")?,
            job_role: r.text("JobRole")?,
            state: r.text("State")?,
            distance_from_home_km: r.number("DistanceFromHome (KM)")?,
            hire_date: r.date("HireDate"),
            years_at_company: r.number("YearsAtCompany")?,
            years_since_last_promotion: r.number("YearsSinceLastPromotion")?,
            years_with_curr_manager: r.number("YearsWithCurrManager")?,
            years_in_most_recent_role: r.number("YearsInMostRecentRole")?,
            salary: r.number("Salary")?,
            stock_option_level: r.code("StockOptionLevel")?,
            education: r.code("Education")?,
            overtime: r.yes_no("OverTime")?,
            attrition: r.attrition("Attrition")?,
            employee_id,
        });
    }

    Ok(out)
}

fn parse_reviews(table: &RawTable) -> Result<HashMap<String, Vec<ReviewRow>>, HrError> {
    let cols = table.require_columns(PERFORMANCE_COLUMNS)?;
    let mut by_employee: HashMap<String, Vec<ReviewRow>> = HashMap::new();

    for (i, row) in table.rows.iter().enumerate() {
        let r = RowReader::new(&cols, row, i + 1);
        let employee_id = r.text(EMPLOYEE_ID)?;
        by_employee.entry(employee_id).or_default().push(ReviewRow {
            review_date: r.date("ReviewDate"),
            job_satisfaction: r.code("JobSatisfaction")?,
            manager_rating: r.number("ManagerRating")?,
        });
    }

    Ok(by_employee)
}

/// Join both tables into one record per (employee, review) pair.
pub fn join_tables(
    employees: &RawTable,
    performance: &RawTable,
) -> Result<Vec<EmployeeRecord>, HrError> {
    let employees = parse_employees(employees)?;
    let mut reviews = parse_reviews(performance)?;

    let mut records = Vec::with_capacity(reviews.values().map(Vec::len).sum());
    let mut without_reviews = 0usize;

    for emp in &employees {
        let Some(emp_reviews) = reviews.remove(&emp.employee_id) else {
            without_reviews += 1;
            continue;
        };
        for review in emp_reviews {
            records.push(EmployeeRecord {
                employee_id: emp.employee_id.clone(),
                department: emp.department.clone(),
                gender: emp.gender.clone(),
                age: emp.age,
                marital_status: emp.marital_status.clone(),
                job_role: emp.job_role.clone(),
                state: emp.state.clone(),
                distance_from_home_km: emp.distance_from_home_km,
                hire_date: emp.hire_date,
                years_at_company: emp.years_at_company,
                years_since_last_promotion: emp.years_since_last_promotion,
                years_with_curr_manager: emp.years_with_curr_manager,
                years_in_most_recent_role: emp.years_in_most_recent_role,
                salary: emp.salary,
                stock_option_level: emp.stock_option_level,
                education: emp.education,
                job_satisfaction: review.job_satisfaction,
                overtime: emp.overtime,
                attrition: emp.attrition,
                review_date: review.review_date,
                manager_rating: review.manager_rating,
            });
        }
    }

    // Whatever is left in `reviews` has no matching employee.
    let orphan_reviews: usize = reviews.values().map(Vec::len).sum();
    if without_reviews > 0 || orphan_reviews > 0 {
        debug!(without_reviews, orphan_reviews, "inner join dropped unmatched rows");
    }
    info!(
        employees = employees.len(),
        records = records.len(),
        "joined employee and performance tables"
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, headers: &[&str], rows: Vec<Vec<&str>>) -> RawTable {
        RawTable {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|r| {
                    r.into_iter()
                        .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                        .collect()
                })
                .collect(),
        }
    }

    fn employee_row<'a>(id: &'a str, attrition: &'a str) -> Vec<&'a str> {
        vec![
            id, "Female", "30", "Sales", "12", "CA", "3", "Sales Executive", "Single", "50000",
            "1", "No", "2015-03-01", attrition, "5", "2", "3", "2",
        ]
    }

    fn employees(rows: Vec<Vec<&str>>) -> RawTable {
        table("employee", EMPLOYEE_COLUMNS, rows)
    }

    fn reviews(rows: Vec<Vec<&str>>) -> RawTable {
        table("performance", PERFORMANCE_COLUMNS, rows)
    }

    #[test]
    fn inner_join_keeps_employee_then_review_order() {
        let emp = employees(vec![employee_row("B", "No"), employee_row("A", "Yes")]);
        let perf = reviews(vec![
            vec!["A", "2016-01-01", "3", "4"],
            vec!["B", "2017-01-01", "2", "2"],
            vec!["A", "2018-01-01", "4", "5"],
            vec!["Z", "2018-01-01", "4", "5"],
        ]);

        let records = join_tables(&emp, &perf).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "A"]);
        assert_eq!(records[1].manager_rating, 4.0);
        assert_eq!(records[2].manager_rating, 5.0);
        assert!(records[1].attrition.has_left());
    }

    #[test]
    fn employees_without_reviews_are_dropped() {
        let emp = employees(vec![employee_row("A", "No"), employee_row("B", "No")]);
        let perf = reviews(vec![vec!["A", "2016-01-01", "3", "4"]]);

        let records = join_tables(&emp, &perf).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id, "A");
    }

    #[test]
    fn duplicate_employee_id_is_fatal() {
        let emp = employees(vec![employee_row("A", "No"), employee_row("A", "No")]);
        let perf = reviews(vec![]);

        let err = join_tables(&emp, &perf).unwrap_err();
        assert!(matches!(err, HrError::DuplicateKey { .. }));
    }

    #[test]
    fn bad_number_is_fatal_but_bad_date_is_not() {
        let mut row = employee_row("A", "No");
        row[12] = "someday";
        let emp = employees(vec![row]);
        let perf = reviews(vec![vec!["A", "garbage", "3", "4"]]);

        let records = join_tables(&emp, &perf).unwrap();
        assert_eq!(records[0].hire_date, None);
        assert_eq!(records[0].review_date, None);

        let bad = reviews(vec![vec!["A", "2016-01-01", "3", "four"]]);
        let emp = employees(vec![employee_row("A", "No")]);
        let err = join_tables(&emp, &bad).unwrap_err();
        match err {
            HrError::InvalidValue { column, value, .. } => {
                assert_eq!(column, "ManagerRating");
                assert_eq!(value, "four");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
