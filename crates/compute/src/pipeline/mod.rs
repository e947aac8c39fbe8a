//! Cohort rules pipeline.
//!
//! Review rows → per-employee views ([`aggregate`]) → eligibility flags
//! ([`eligibility`]) → cohort rates and tables ([`rates`], [`summary`]) →
//! page reports ([`dashboard`]). Every stage is a pure function of its input.

pub mod aggregate;
pub mod bucket;
pub mod dashboard;
pub mod eligibility;
pub mod features;
pub mod rates;
pub mod summary;

pub use aggregate::{aggregate_per_employee, EmployeeCohortView};
pub use bucket::{bucketize, Brackets, Bucketizer};
pub use dashboard::{
    attrition_report, demographics_report, promotion_report, AttritionReport, DemographicsReport,
    PromotionReport,
};
pub use eligibility::{evaluate_eligibility, EligibilityFlags};
pub use features::{FeatureInput, FeatureSchema, FEATURE_SCHEMA_VERSION};
pub use rates::{cohort_rate, format_rate, CohortFilter, Rate};
pub use summary::{breakdown, distribution, histogram, CohortRow, CohortTable, Dimension, HistogramBin};
