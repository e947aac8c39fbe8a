use hrlens_core::{EmployeeRecord, EmployeeStatus};
use serde::{Deserialize, Serialize};

/// Percentage of `population` matching `predicate`, in `[0, 100]`.
///
/// An empty population yields 0.
pub fn cohort_rate<T, P>(population: &[T], predicate: P) -> f64
where
    P: Fn(&T) -> bool,
{
    if population.is_empty() {
        return 0.0;
    }
    let hits = population.iter().filter(|e| predicate(e)).count();
    percentage(hits, population.len())
}

/// `100 * part / whole`, 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Two-decimal percentage string, e.g. `"28.57%"`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// A rate with its display form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rate {
    pub value: f64,
    pub display: String,
}

impl Rate {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            display: format_rate(value),
        }
    }

    pub fn of<T, P>(population: &[T], predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        Self::new(cohort_rate(population, predicate))
    }
}

/// Dashboard filter selection. Empty lists do not restrict. Text values
/// compare ASCII case-insensitively, the same way the gendered attrition
/// rates pick their cohorts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortFilter {
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
}

fn allowed(choices: &[String], value: &str) -> bool {
    choices.is_empty() || choices.iter().any(|c| c.eq_ignore_ascii_case(value))
}

impl CohortFilter {
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
            && self.genders.is_empty()
            && self.states.is_empty()
            && self.status.is_none()
    }

    /// Row-level check. Every filtered field comes from the employee
    /// table, so all review rows of one employee agree.
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        allowed(&self.departments, &record.department)
            && allowed(&self.genders, &record.gender)
            && allowed(&self.states, &record.state)
            && self.status.map_or(true, |s| s.matches(record.attrition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_of_three_in_ten() {
        let population: Vec<bool> = (0..10).map(|i| i < 3).collect();
        assert_eq!(cohort_rate(&population, |&flag| flag), 30.0);
    }

    #[test]
    fn empty_cohort_is_zero() {
        let empty: Vec<u32> = Vec::new();
        let rate = cohort_rate(&empty, |_| true);
        assert_eq!(rate, 0.0);
        assert!(!rate.is_nan());
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn rate_stays_in_range() {
        for n in 1..20usize {
            let population: Vec<usize> = (0..n).collect();
            for k in 0..=n {
                let r = cohort_rate(&population, |&i| i < k);
                assert!((0.0..=100.0).contains(&r), "{r}");
            }
        }
    }

    #[test]
    fn two_decimal_display() {
        assert_eq!(format_rate(200.0 / 7.0), "28.57%");
        assert_eq!(format_rate(0.0), "0.00%");
        assert_eq!(Rate::new(30.0).display, "30.00%");
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = CohortFilter::default();
        assert!(f.is_empty());
        let g = CohortFilter {
            genders: vec!["Female".into()],
            ..Default::default()
        };
        assert!(!g.is_empty());
    }

    #[test]
    fn filter_values_ignore_case() {
        let mut record = EmployeeRecord {
            employee_id: "E1".into(),
            department: "Human Resources".into(),
            gender: "Female".into(),
            age: 30.0,
            marital_status: "Single".into(),
            job_role: "Recruiter".into(),
            state: "NY".into(),
            distance_from_home_km: 3.0,
            hire_date: None,
            years_at_company: 2.0,
            years_since_last_promotion: 1.0,
            years_with_curr_manager: 1.0,
            years_in_most_recent_role: 1.0,
            salary: 40_000.0,
            stock_option_level: 0,
            education: 3,
            job_satisfaction: 3,
            overtime: false,
            attrition: hrlens_core::Attrition::No,
            review_date: None,
            manager_rating: 3.0,
        };
        let f = CohortFilter {
            departments: vec!["human resources".into()],
            genders: vec!["FEMALE".into()],
            states: vec!["ny".into()],
            status: Some(EmployeeStatus::Active),
        };
        assert!(f.matches(&record));

        record.gender = "Male".into();
        assert!(!f.matches(&record));
    }
}
