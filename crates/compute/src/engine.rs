use hrlens_core::config::ModelConfig;
use hrlens_core::Dataset;
use hrlens_rules::CompiledCohortRules;
use tracing::info;

use crate::error::Result;
use crate::model::AttritionModel;
use crate::pipeline::{
    aggregate_per_employee, attrition_report, breakdown, demographics_report, distribution,
    evaluate_eligibility, promotion_report, AttritionReport, Brackets, CohortFilter, CohortTable,
    DemographicsReport, Dimension, EligibilityFlags, EmployeeCohortView, PromotionReport,
};

/// Dataset plus compiled rules, answering dashboard queries.
///
/// Holds no mutable state: every query re-derives its views from the
/// dataset handle and the filter it is given.
#[derive(Debug, Clone)]
pub struct CohortEngine {
    dataset: Dataset,
    rules: CompiledCohortRules,
    brackets: Brackets,
}

impl CohortEngine {
    pub fn new(dataset: Dataset, rules: CompiledCohortRules) -> Self {
        let brackets = Brackets::new(&rules.brackets);
        Self {
            dataset,
            rules,
            brackets,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn rules(&self) -> &CompiledCohortRules {
        &self.rules
    }

    pub fn brackets(&self) -> &Brackets {
        &self.brackets
    }

    /// Per-employee views of the employees selected by `filter`.
    pub fn views(&self, filter: &CohortFilter) -> Vec<EmployeeCohortView> {
        let views = if filter.is_empty() {
            aggregate_per_employee(self.dataset.records())
        } else {
            let subset = self.dataset.filter(|r| filter.matches(r));
            aggregate_per_employee(subset.records())
        };
        info!(employees = views.len(), "built cohort views");
        views
    }

    pub fn eligibility(&self, employee: &EmployeeCohortView) -> EligibilityFlags {
        evaluate_eligibility(employee, &self.rules)
    }

    pub fn distribution(&self, filter: &CohortFilter, dimension: Dimension) -> CohortTable {
        distribution(&self.views(filter), dimension, &self.brackets)
    }

    /// Attrition rate per value of `dimension`.
    pub fn attrition_breakdown(&self, filter: &CohortFilter, dimension: Dimension) -> CohortTable {
        breakdown(&self.views(filter), dimension, &self.brackets, |v| {
            v.attrition.has_left()
        })
    }

    pub fn demographics(&self, filter: &CohortFilter) -> DemographicsReport {
        demographics_report(&self.views(filter), &self.brackets)
    }

    pub fn promotions(&self, filter: &CohortFilter) -> PromotionReport {
        promotion_report(&self.views(filter), &self.rules, &self.brackets)
    }

    pub fn attrition(&self, filter: &CohortFilter) -> AttritionReport {
        attrition_report(&self.views(filter), &self.brackets)
    }

    /// Train the attrition model on the whole dataset.
    pub fn train_model(&self, config: &ModelConfig) -> Result<AttritionModel> {
        AttritionModel::train(&self.views(&CohortFilter::default()), config)
    }
}
