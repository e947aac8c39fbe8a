//! YAML rule documents for the cohort engine.
//!
//! This crate provides:
//! - The `CohortRules` kind: eligibility thresholds and bracket definitions
//! - Structured validation with blocking errors and advisory warnings
//! - A loader that resolves a configured file or the embedded default

pub mod cohort_rules;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cohort_rules::{
    BracketDefinition, BracketSet, CohortRulesRule, CohortRulesSpec, CompiledCohortRules,
    PromotionThresholds, RetrenchmentThresholds,
};
pub use error::RuleError;
pub use loader::{CohortRulesLoader, DEFAULT_RULES_YAML};
pub use validation::{validate_rule, validate_yaml, ValidationResult};
