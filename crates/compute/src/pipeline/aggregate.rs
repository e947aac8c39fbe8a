use std::collections::BTreeMap;

use hrlens_core::{Attrition, EmployeeId, EmployeeRecord};
use serde::Serialize;
use tracing::warn;

/// One row per employee, reduced from their review rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeCohortView {
    pub employee_id: EmployeeId,
    pub department: String,
    pub gender: String,
    pub state: String,
    /// Last value in row order.
    pub marital_status: String,
    /// Last value in row order.
    pub job_role: String,
    /// Last value in row order.
    pub overtime: bool,
    pub education: u8,
    /// Satisfaction recorded on the last review row.
    pub job_satisfaction: u8,
    pub stock_option_level: u8,
    pub age: f64,
    pub distance_from_home_km: f64,
    pub salary: f64,
    pub years_since_last_promotion: f64,
    pub years_with_curr_manager: f64,
    pub years_in_most_recent_role: f64,
    /// Mean manager rating across all reviews.
    pub average_manager_rating: f64,
    /// `Yes` if any row says so.
    pub attrition: Attrition,
    /// Latest review year minus hire year. `None` when either date is
    /// missing or the difference is negative.
    pub tenure: Option<i32>,
}

impl EmployeeCohortView {
    pub fn tenure_years(&self) -> Option<f64> {
        self.tenure.map(f64::from)
    }

    pub fn is_active(&self) -> bool {
        !self.attrition.has_left()
    }
}

/// Running sums and last-seen values for one employee.
struct Accumulator<'a> {
    rows: usize,
    last: &'a EmployeeRecord,
    age: f64,
    distance: f64,
    salary: f64,
    years_since_last_promotion: f64,
    years_with_curr_manager: f64,
    years_in_most_recent_role: f64,
    rating: f64,
    left: bool,
    hire_year: Option<i32>,
    max_review_year: Option<i32>,
}

impl<'a> Accumulator<'a> {
    fn new(first: &'a EmployeeRecord) -> Self {
        Self {
            rows: 0,
            last: first,
            age: 0.0,
            distance: 0.0,
            salary: 0.0,
            years_since_last_promotion: 0.0,
            years_with_curr_manager: 0.0,
            years_in_most_recent_role: 0.0,
            rating: 0.0,
            left: false,
            hire_year: None,
            max_review_year: None,
        }
    }

    fn push(&mut self, r: &'a EmployeeRecord) {
        self.rows += 1;
        self.last = r;
        self.age += r.age;
        self.distance += r.distance_from_home_km;
        self.salary += r.salary;
        self.years_since_last_promotion += r.years_since_last_promotion;
        self.years_with_curr_manager += r.years_with_curr_manager;
        self.years_in_most_recent_role += r.years_in_most_recent_role;
        self.rating += r.manager_rating;
        self.left |= r.attrition.has_left();
        if let Some(y) = r.hire_year() {
            self.hire_year = Some(y);
        }
        if let Some(y) = r.review_year() {
            self.max_review_year = Some(self.max_review_year.map_or(y, |m| m.max(y)));
        }
    }

    fn finish(self) -> EmployeeCohortView {
        let n = self.rows as f64;
        let r = self.last;

        let tenure = match (self.max_review_year, self.hire_year) {
            (Some(review), Some(hire)) if review >= hire => Some(review - hire),
            (Some(review), Some(hire)) => {
                warn!(
                    employee_id = %r.employee_id,
                    hire_year = hire,
                    review_year = review,
                    "negative tenure, treating as missing"
                );
                None
            }
            _ => None,
        };

        EmployeeCohortView {
            employee_id: r.employee_id.clone(),
            department: r.department.clone(),
            gender: r.gender.clone(),
            state: r.state.clone(),
            marital_status: r.marital_status.clone(),
            job_role: r.job_role.clone(),
            overtime: r.overtime,
            education: r.education,
            job_satisfaction: r.job_satisfaction,
            stock_option_level: r.stock_option_level,
            age: self.age / n,
            distance_from_home_km: self.distance / n,
            salary: self.salary / n,
            years_since_last_promotion: self.years_since_last_promotion / n,
            years_with_curr_manager: self.years_with_curr_manager / n,
            years_in_most_recent_role: self.years_in_most_recent_role / n,
            average_manager_rating: self.rating / n,
            attrition: if self.left { Attrition::Yes } else { Attrition::No },
            tenure,
        }
    }
}

/// Reduce review rows to one view per employee, sorted by employee id.
///
/// "Last" fields follow input row order, not review date, so the result is
/// deterministic for a fixed input order.
pub fn aggregate_per_employee(records: &[EmployeeRecord]) -> Vec<EmployeeCohortView> {
    let mut groups: BTreeMap<&str, Accumulator<'_>> = BTreeMap::new();
    for r in records {
        groups
            .entry(r.employee_id.as_str())
            .or_insert_with(|| Accumulator::new(r))
            .push(r);
    }
    groups.into_values().map(Accumulator::finish).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> Option<NaiveDate> {
        s.parse().ok()
    }

    fn review(id: &str, rating: f64, review_date: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            department: "Technology".to_string(),
            gender: "Female".to_string(),
            age: 30.0,
            marital_status: "Single".to_string(),
            job_role: "Data Scientist".to_string(),
            state: "CA".to_string(),
            distance_from_home_km: 10.0,
            hire_date: date("2015-06-01"),
            years_at_company: 3.0,
            years_since_last_promotion: 2.0,
            years_with_curr_manager: 1.0,
            years_in_most_recent_role: 1.0,
            salary: 50_000.0,
            stock_option_level: 0,
            education: 3,
            job_satisfaction: 3,
            overtime: false,
            attrition: Attrition::No,
            review_date: date(review_date),
            manager_rating: rating,
        }
    }

    #[test]
    fn mean_rating_over_three_reviews() {
        let rows = vec![
            review("A", 2.0, "2019-01-01"),
            review("A", 3.0, "2020-01-01"),
            review("A", 4.0, "2021-01-01"),
        ];
        let views = aggregate_per_employee(&rows);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].average_manager_rating, 3.0);
        assert_eq!(views[0].tenure, Some(6));
    }

    #[test]
    fn last_values_follow_row_order_not_review_date() {
        let mut newer = review("A", 3.0, "2022-01-01");
        newer.job_role = "Manager".to_string();
        let mut older = review("A", 3.0, "2018-01-01");
        older.job_role = "Analyst".to_string();
        older.overtime = true;

        let views = aggregate_per_employee(&[newer, older]);
        assert_eq!(views[0].job_role, "Analyst");
        assert!(views[0].overtime);
        // Tenure still uses the latest review year.
        assert_eq!(views[0].tenure, Some(7));
    }

    #[test]
    fn attrition_is_any_row() {
        let mut left = review("A", 3.0, "2020-01-01");
        left.attrition = Attrition::Yes;
        let views = aggregate_per_employee(&[review("A", 3.0, "2019-01-01"), left]);
        assert_eq!(views[0].attrition, Attrition::Yes);
        assert!(!views[0].is_active());
    }

    #[test]
    fn negative_or_unparsed_tenure_is_missing() {
        let before_hire = review("A", 3.0, "2014-01-01");
        let mut no_hire = review("B", 3.0, "2020-01-01");
        no_hire.hire_date = None;
        let no_review = review("C", 3.0, "garbage");

        let views = aggregate_per_employee(&[before_hire, no_hire, no_review]);
        assert!(views.iter().all(|v| v.tenure.is_none()));
    }

    #[test]
    fn one_view_per_employee_sorted_by_id() {
        let rows = vec![
            review("C", 1.0, "2020-01-01"),
            review("A", 2.0, "2020-01-01"),
            review("C", 3.0, "2021-01-01"),
            review("B", 4.0, "2020-01-01"),
        ];
        let views = aggregate_per_employee(&rows);
        let ids: Vec<&str> = views.iter().map(|v| v.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(views[2].average_manager_rating, 2.0);
    }
}
