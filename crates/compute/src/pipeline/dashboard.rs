//! Report payloads for the three dashboard pages.

use hrlens_rules::CompiledCohortRules;
use serde::Serialize;

use super::aggregate::EmployeeCohortView;
use super::bucket::Brackets;
use super::eligibility::evaluate_eligibility;
use super::rates::Rate;
use super::summary::{breakdown, distribution, histogram, CohortTable, Dimension, HistogramBin};

/// Salary histograms use this many bins.
pub const SALARY_BINS: usize = 100;

fn has_left(v: &EmployeeCohortView) -> bool {
    v.attrition.has_left()
}

fn salaries<'a>(views: impl IntoIterator<Item = &'a EmployeeCohortView>) -> Vec<f64> {
    views.into_iter().map(|v| v.salary).collect()
}

// ── Demographics ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DemographicsReport {
    pub total_employees: usize,
    pub attrition_rate: Rate,
    pub average_salary: f64,
    pub by_gender: CohortTable,
    pub by_tenure: CohortTable,
    pub by_marital_status: CohortTable,
    pub by_age: CohortTable,
    pub salary_histogram: Vec<HistogramBin>,
}

pub fn demographics_report(views: &[EmployeeCohortView], brackets: &Brackets) -> DemographicsReport {
    let average_salary = if views.is_empty() {
        0.0
    } else {
        views.iter().map(|v| v.salary).sum::<f64>() / views.len() as f64
    };

    DemographicsReport {
        total_employees: views.len(),
        attrition_rate: Rate::of(views, has_left),
        average_salary,
        by_gender: distribution(views, Dimension::Gender, brackets),
        by_tenure: distribution(views, Dimension::TenureBracket, brackets),
        by_marital_status: distribution(views, Dimension::MaritalStatus, brackets),
        by_age: distribution(views, Dimension::AgeBracket, brackets),
        salary_histogram: histogram(&salaries(views), SALARY_BINS),
    }
}

// ── Promotion & retrenchment ────────────────────────────────────────

/// One eligibility flag broken down by the page's five dimensions. Group
/// totals count every employee, leavers included.
#[derive(Debug, Clone, Serialize)]
pub struct FlagBreakdowns {
    pub by_job_role: CohortTable,
    pub by_department: CohortTable,
    pub by_age: CohortTable,
    pub by_gender: CohortTable,
    pub by_tenure: CohortTable,
}

impl FlagBreakdowns {
    fn build<P>(population: &[EmployeeCohortView], brackets: &Brackets, flag: P) -> Self
    where
        P: Fn(&EmployeeCohortView) -> bool + Copy,
    {
        Self {
            by_job_role: breakdown(population, Dimension::JobRole, brackets, flag),
            by_department: breakdown(population, Dimension::Department, brackets, flag),
            by_age: breakdown(population, Dimension::AgeBracket, brackets, flag),
            by_gender: breakdown(population, Dimension::Gender, brackets, flag),
            by_tenure: breakdown(population, Dimension::TenureBracket, brackets, flag),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PromotionReport {
    /// The two headline rates are taken over active employees only.
    pub active_employees: usize,
    pub promotion_candidates: usize,
    pub retrenchment_candidates: usize,
    pub promotion_rate: Rate,
    pub retrenchment_rate: Rate,
    pub promotion: FlagBreakdowns,
    pub retrenchment: FlagBreakdowns,
}

pub fn promotion_report(
    views: &[EmployeeCohortView],
    rules: &CompiledCohortRules,
    brackets: &Brackets,
) -> PromotionReport {
    let active: Vec<EmployeeCohortView> = views.iter().filter(|v| v.is_active()).cloned().collect();
    let promoted = |v: &EmployeeCohortView| evaluate_eligibility(v, rules).to_be_promoted;
    let retrenched = |v: &EmployeeCohortView| evaluate_eligibility(v, rules).to_be_retrenched;

    PromotionReport {
        active_employees: active.len(),
        promotion_candidates: active.iter().filter(|v| promoted(v)).count(),
        retrenchment_candidates: active.iter().filter(|v| retrenched(v)).count(),
        promotion_rate: Rate::of(&active, promoted),
        retrenchment_rate: Rate::of(&active, retrenched),
        promotion: FlagBreakdowns::build(views, brackets, promoted),
        retrenchment: FlagBreakdowns::build(views, brackets, retrenched),
    }
}

// ── Attrition ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct AttritionReport {
    pub employees: usize,
    pub leavers: usize,
    pub overall: Rate,
    pub female: Rate,
    pub male: Rate,
    pub by_tenure: CohortTable,
    pub by_age: CohortTable,
    pub by_distance: CohortTable,
    pub by_education: CohortTable,
    pub by_overtime: CohortTable,
    pub by_job_satisfaction: CohortTable,
    pub by_job_role: CohortTable,
    pub by_stock_option_level: CohortTable,
    pub leaver_salary_histogram: Vec<HistogramBin>,
}

fn gender_rate(views: &[EmployeeCohortView], gender: &str) -> Rate {
    let cohort: Vec<EmployeeCohortView> = views
        .iter()
        .filter(|v| v.gender.eq_ignore_ascii_case(gender))
        .cloned()
        .collect();
    Rate::of(&cohort, has_left)
}

/// Leavers are always taken from `views`, so a filtered population never
/// mixes with the unfiltered one.
pub fn attrition_report(views: &[EmployeeCohortView], brackets: &Brackets) -> AttritionReport {
    let by = |dimension| breakdown(views, dimension, brackets, has_left);

    AttritionReport {
        employees: views.len(),
        leavers: views.iter().filter(|v| has_left(v)).count(),
        overall: Rate::of(views, has_left),
        female: gender_rate(views, "Female"),
        male: gender_rate(views, "Male"),
        by_tenure: by(Dimension::TenureBracket),
        by_age: by(Dimension::AgeBracket),
        by_distance: by(Dimension::DistanceBracket),
        by_education: by(Dimension::Education),
        by_overtime: by(Dimension::OverTime),
        by_job_satisfaction: by(Dimension::JobSatisfaction),
        by_job_role: by(Dimension::JobRole),
        by_stock_option_level: by(Dimension::StockOptionLevel),
        leaver_salary_histogram: histogram(
            &salaries(views.iter().filter(|v| has_left(v))),
            SALARY_BINS,
        ),
    }
}
