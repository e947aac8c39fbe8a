use std::collections::BTreeSet;
use std::sync::Arc;

use crate::record::EmployeeRecord;

/// Immutable handle over the joined employee × review rows.
///
/// Cloning is cheap. Filtering produces a new handle; the rows of an
/// existing handle never change.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[EmployeeRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct employee identifiers.
    pub fn employee_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.employee_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Keep rows matching `predicate`, preserving row order.
    pub fn filter<F>(&self, predicate: F) -> Dataset
    where
        F: Fn(&EmployeeRecord) -> bool,
    {
        Dataset::new(
            self.records
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Attrition;

    fn row(id: &str, dept: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            department: dept.to_string(),
            gender: "Female".to_string(),
            age: 30.0,
            marital_status: "Single".to_string(),
            job_role: "Data Scientist".to_string(),
            state: "CA".to_string(),
            distance_from_home_km: 10.0,
            hire_date: None,
            years_at_company: 3.0,
            years_since_last_promotion: 1.0,
            years_with_curr_manager: 1.0,
            years_in_most_recent_role: 1.0,
            salary: 50_000.0,
            stock_option_level: 0,
            education: 3,
            job_satisfaction: 3,
            overtime: false,
            attrition: Attrition::No,
            review_date: None,
            manager_rating: 3.0,
        }
    }

    #[test]
    fn filter_returns_new_handle() {
        let ds = Dataset::new(vec![row("a", "Sales"), row("a", "Sales"), row("b", "Technology")]);
        let sales = ds.filter(|r| r.department == "Sales");

        assert_eq!(sales.len(), 2);
        assert_eq!(sales.employee_count(), 1);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.employee_count(), 2);
    }
}
