use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Join key shared by the employee and performance tables.
pub type EmployeeId = String;

/// Terminal employment state. `Yes` means the employee has left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attrition {
    Yes,
    No,
}

impl Attrition {
    pub fn has_left(self) -> bool {
        self == Attrition::Yes
    }
}

impl std::str::FromStr for Attrition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Attrition::Yes),
            "no" => Ok(Attrition::No),
            other => Err(format!("expected Yes/No, got '{}'", other)),
        }
    }
}

impl std::fmt::Display for Attrition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attrition::Yes => write!(f, "Yes"),
            Attrition::No => write!(f, "No"),
        }
    }
}

/// Dashboard-facing view of the attrition flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn matches(self, attrition: Attrition) -> bool {
        match self {
            EmployeeStatus::Active => attrition == Attrition::No,
            EmployeeStatus::Inactive => attrition == Attrition::Yes,
        }
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            other => Err(format!("unknown employee status: '{}'", other)),
        }
    }
}

/// One (employee, performance review) pair after the inner join.
///
/// Employee-level columns repeat on every review row of the same employee.
/// Dates are `None` when the source value could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: EmployeeId,
    pub department: String,
    pub gender: String,
    pub age: f64,
    pub marital_status: String,
    pub job_role: String,
    pub state: String,
    pub distance_from_home_km: f64,
    pub hire_date: Option<NaiveDate>,
    /// Source-provided tenure. Known to be wrong; tenure is recomputed from dates.
    pub years_at_company: f64,
    pub years_since_last_promotion: f64,
    pub years_with_curr_manager: f64,
    pub years_in_most_recent_role: f64,
    pub salary: f64,
    pub stock_option_level: u8,
    /// Raw ordinal code, see [`crate::EducationLevel`].
    pub education: u8,
    /// Raw ordinal code, see [`crate::JobSatisfaction`].
    pub job_satisfaction: u8,
    pub overtime: bool,
    pub attrition: Attrition,
    pub review_date: Option<NaiveDate>,
    pub manager_rating: f64,
}

impl EmployeeRecord {
    pub fn hire_year(&self) -> Option<i32> {
        self.hire_date.map(|d| d.year())
    }

    pub fn review_year(&self) -> Option<i32> {
        self.review_date.map(|d| d.year())
    }
}
