use hrlens_rules::CompiledCohortRules;
use serde::Serialize;

use super::aggregate::EmployeeCohortView;

/// Per-employee candidate flags. Both can be true under custom thresholds;
/// nothing here forces them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EligibilityFlags {
    pub to_be_promoted: bool,
    pub to_be_retrenched: bool,
}

/// Apply the promotion and retrenchment thresholds to one employee.
///
/// Employees who have left are never candidates for either.
pub fn evaluate_eligibility(
    employee: &EmployeeCohortView,
    rules: &CompiledCohortRules,
) -> EligibilityFlags {
    if !employee.is_active() {
        return EligibilityFlags::default();
    }

    let years = employee.years_since_last_promotion;
    let rating = employee.average_manager_rating;
    let p = &rules.promotion;
    let r = &rules.retrenchment;

    EligibilityFlags {
        to_be_promoted: years >= p.min_years_since_promotion && rating >= p.min_average_rating,
        to_be_retrenched: years >= r.min_years_since_promotion && rating < r.max_average_rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrlens_core::Attrition;

    fn employee(years: f64, rating: f64, attrition: Attrition) -> EmployeeCohortView {
        EmployeeCohortView {
            employee_id: "E".to_string(),
            department: "Sales".to_string(),
            gender: "Male".to_string(),
            state: "NY".to_string(),
            marital_status: "Married".to_string(),
            job_role: "Sales Executive".to_string(),
            overtime: false,
            education: 3,
            job_satisfaction: 3,
            stock_option_level: 1,
            age: 40.0,
            distance_from_home_km: 10.0,
            salary: 60_000.0,
            years_since_last_promotion: years,
            years_with_curr_manager: 2.0,
            years_in_most_recent_role: 2.0,
            average_manager_rating: rating,
            attrition,
            tenure: Some(10),
        }
    }

    fn flags(years: f64, rating: f64, attrition: Attrition) -> EligibilityFlags {
        evaluate_eligibility(&employee(years, rating, attrition), &CompiledCohortRules::default())
    }

    #[test]
    fn promotion_candidate() {
        let f = flags(9.0, 4.0, Attrition::No);
        assert!(f.to_be_promoted);
        assert!(!f.to_be_retrenched);
    }

    #[test]
    fn retrenchment_candidate() {
        let f = flags(5.0, 2.5, Attrition::No);
        assert!(f.to_be_retrenched);
        assert!(!f.to_be_promoted);
    }

    #[test]
    fn leavers_are_never_flagged() {
        assert_eq!(flags(9.0, 4.0, Attrition::Yes), EligibilityFlags::default());
        assert_eq!(flags(5.0, 2.5, Attrition::Yes), EligibilityFlags::default());
    }

    #[test]
    fn boundaries() {
        // Minimums are inclusive.
        assert!(flags(8.0, 3.5, Attrition::No).to_be_promoted);
        assert!(flags(4.0, 2.99, Attrition::No).to_be_retrenched);
        // The rating ceiling is exclusive.
        assert!(!flags(4.0, 3.0, Attrition::No).to_be_retrenched);
        assert!(!flags(7.99, 5.0, Attrition::No).to_be_promoted);
        assert!(!flags(3.99, 1.0, Attrition::No).to_be_retrenched);
    }

    #[test]
    fn deterministic() {
        let e = employee(6.0, 2.0, Attrition::No);
        let rules = CompiledCohortRules::default();
        assert_eq!(evaluate_eligibility(&e, &rules), evaluate_eligibility(&e, &rules));
    }

    #[test]
    fn overlapping_thresholds_set_both_flags() {
        let mut rules = CompiledCohortRules::default();
        rules.promotion.min_average_rating = 2.0;
        rules.retrenchment.max_average_rating = 3.0;
        let f = evaluate_eligibility(&employee(9.0, 2.5, Attrition::No), &rules);
        assert!(f.to_be_promoted && f.to_be_retrenched);
    }
}
