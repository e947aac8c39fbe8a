//! CohortRules engine: per-employee aggregation, eligibility rules, cohort
//! rates and tables, dashboard reports and the attrition classifier.

pub mod algorithms;
pub mod engine;
pub mod error;
pub mod model;
pub mod pipeline;

pub use engine::CohortEngine;
pub use error::ComputeError;
pub use model::{AttritionModel, Prediction};
pub use pipeline::{
    aggregate_per_employee, bucketize, cohort_rate, evaluate_eligibility, format_rate,
    CohortFilter, Dimension, EligibilityFlags, EmployeeCohortView, FeatureInput, FeatureSchema,
};
