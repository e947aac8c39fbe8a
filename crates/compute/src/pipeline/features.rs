//! Versioned feature layout shared by aggregation and the attrition model.
//!
//! The schema is the single owner of column order: training rows and
//! prediction inputs are both encoded through [`FeatureSchema::encode`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::aggregate::EmployeeCohortView;
use crate::error::{ComputeError, Result};

pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Numeric columns, in encoding order.
pub const NUMERIC_FEATURES: [&str; 5] = [
    "Tenure",
    "Age",
    "YearsWithCurrManager",
    "YearsInMostRecentRole",
    "YearsSinceLastPromotion",
];

/// Model input for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInput {
    pub tenure: f64,
    pub age: f64,
    pub years_with_curr_manager: f64,
    pub years_in_most_recent_role: f64,
    pub years_since_last_promotion: f64,
    pub job_role: String,
    pub overtime: bool,
    pub marital_status: String,
}

impl FeatureInput {
    /// `None` when tenure is unknown; such employees are not used for training.
    pub fn from_view(view: &EmployeeCohortView) -> Option<Self> {
        Some(Self {
            tenure: view.tenure_years()?,
            age: view.age,
            years_with_curr_manager: view.years_with_curr_manager,
            years_in_most_recent_role: view.years_in_most_recent_role,
            years_since_last_promotion: view.years_since_last_promotion,
            job_role: view.job_role.clone(),
            overtime: view.overtime,
            marital_status: view.marital_status.clone(),
        })
    }

    fn numeric(&self) -> [f64; 5] {
        [
            self.tenure,
            self.age,
            self.years_with_curr_manager,
            self.years_in_most_recent_role,
            self.years_since_last_promotion,
        ]
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Numeric columns followed by one-hot groups for job role, overtime and
/// marital status. Levels inside each group are sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    pub job_roles: Vec<String>,
    pub overtime: Vec<String>,
    pub marital_statuses: Vec<String>,
}

impl FeatureSchema {
    /// Collect the categorical levels observed in `inputs`.
    pub fn fit(inputs: &[FeatureInput]) -> Self {
        let mut job_roles = BTreeSet::new();
        let mut overtime = BTreeSet::new();
        let mut marital = BTreeSet::new();
        for input in inputs {
            job_roles.insert(input.job_role.clone());
            overtime.insert(yes_no(input.overtime).to_string());
            marital.insert(input.marital_status.clone());
        }
        Self {
            version: FEATURE_SCHEMA_VERSION,
            job_roles: job_roles.into_iter().collect(),
            overtime: overtime.into_iter().collect(),
            marital_statuses: marital.into_iter().collect(),
        }
    }

    /// Ordered column names, e.g. `JobRole_Data Scientist`.
    pub fn columns(&self) -> Vec<String> {
        let mut cols: Vec<String> = NUMERIC_FEATURES.iter().map(|c| c.to_string()).collect();
        cols.extend(self.job_roles.iter().map(|l| format!("JobRole_{l}")));
        cols.extend(self.overtime.iter().map(|l| format!("OverTime_{l}")));
        cols.extend(self.marital_statuses.iter().map(|l| format!("MaritalStatus_{l}")));
        cols
    }

    pub fn width(&self) -> usize {
        NUMERIC_FEATURES.len() + self.job_roles.len() + self.overtime.len() + self.marital_statuses.len()
    }

    /// Encode one input. A categorical level the schema has not seen is an
    /// error, never an all-zero group.
    pub fn encode(&self, input: &FeatureInput) -> Result<Vec<f64>> {
        let mut row = Vec::with_capacity(self.width());
        row.extend_from_slice(&input.numeric());
        one_hot(&mut row, "JobRole", &self.job_roles, &input.job_role)?;
        one_hot(&mut row, "OverTime", &self.overtime, yes_no(input.overtime))?;
        one_hot(&mut row, "MaritalStatus", &self.marital_statuses, &input.marital_status)?;
        Ok(row)
    }
}

fn one_hot(row: &mut Vec<f64>, feature: &'static str, levels: &[String], value: &str) -> Result<()> {
    let hit = levels
        .iter()
        .position(|l| l == value)
        .ok_or_else(|| ComputeError::UnknownLevel {
            feature,
            value: value.to_string(),
            known: levels.join(", "),
        })?;
    row.extend((0..levels.len()).map(|i| if i == hit { 1.0 } else { 0.0 }));
    Ok(())
}
