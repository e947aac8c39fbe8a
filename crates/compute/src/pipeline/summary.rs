//! Cohort tables and histograms for chart rendering.

use std::collections::BTreeMap;

use hrlens_core::{EducationLevel, JobSatisfaction};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::aggregate::EmployeeCohortView;
use super::bucket::Brackets;
use super::rates::percentage;

/// Categorical or bracketed attribute a cohort table is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Department,
    Gender,
    State,
    MaritalStatus,
    JobRole,
    AgeBracket,
    DistanceBracket,
    TenureBracket,
    Education,
    JobSatisfaction,
    StockOptionLevel,
    OverTime,
}

impl Dimension {
    pub const ALL: [Dimension; 12] = [
        Dimension::Department,
        Dimension::Gender,
        Dimension::State,
        Dimension::MaritalStatus,
        Dimension::JobRole,
        Dimension::AgeBracket,
        Dimension::DistanceBracket,
        Dimension::TenureBracket,
        Dimension::Education,
        Dimension::JobSatisfaction,
        Dimension::StockOptionLevel,
        Dimension::OverTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Department => "department",
            Dimension::Gender => "gender",
            Dimension::State => "state",
            Dimension::MaritalStatus => "marital_status",
            Dimension::JobRole => "job_role",
            Dimension::AgeBracket => "age_bracket",
            Dimension::DistanceBracket => "distance_bracket",
            Dimension::TenureBracket => "tenure_bracket",
            Dimension::Education => "education",
            Dimension::JobSatisfaction => "job_satisfaction",
            Dimension::StockOptionLevel => "stock_option_level",
            Dimension::OverTime => "over_time",
        }
    }

    /// Label of `view` along this dimension, `None` when it has no value
    /// (outside every bracket, or tenure unknown).
    ///
    /// Ordinal codes outside the known scale come back as `unmapped(<code>)`
    /// and are logged rather than dropped.
    pub fn value(self, view: &EmployeeCohortView, brackets: &Brackets) -> Option<String> {
        match self {
            Dimension::Department => Some(view.department.clone()),
            Dimension::Gender => Some(view.gender.clone()),
            Dimension::State => Some(view.state.clone()),
            Dimension::MaritalStatus => Some(view.marital_status.clone()),
            Dimension::JobRole => Some(view.job_role.clone()),
            Dimension::AgeBracket => brackets.age.label(view.age).map(str::to_owned),
            Dimension::DistanceBracket => brackets
                .distance
                .label(view.distance_from_home_km)
                .map(str::to_owned),
            Dimension::TenureBracket => view
                .tenure_years()
                .and_then(|t| brackets.tenure.label(t))
                .map(str::to_owned),
            Dimension::Education => Some(match EducationLevel::try_from(view.education) {
                Ok(level) => level.to_string(),
                Err(e) => unmapped(view, e, view.education),
            }),
            Dimension::JobSatisfaction => Some(match JobSatisfaction::try_from(view.job_satisfaction) {
                Ok(level) => level.to_string(),
                Err(e) => unmapped(view, e, view.job_satisfaction),
            }),
            Dimension::StockOptionLevel => Some(view.stock_option_level.to_string()),
            Dimension::OverTime => Some(if view.overtime { "Yes" } else { "No" }.to_string()),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Dimension::ALL
            .into_iter()
            .find(|d| d.as_str() == key)
            .ok_or_else(|| format!("unknown dimension: '{}'", s))
    }
}

fn unmapped(view: &EmployeeCohortView, err: hrlens_core::HrError, code: u8) -> String {
    warn!(employee_id = %view.employee_id, error = %err, "unmapped ordinal code");
    format!("unmapped({})", code)
}

/// One bar of a cohort chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortRow {
    pub label: String,
    /// Employees counted in this row.
    pub count: usize,
    /// Denominator of `percentage`.
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortTable {
    pub dimension: Dimension,
    pub rows: Vec<CohortRow>,
}

impl CohortTable {
    pub fn row(&self, label: &str) -> Option<&CohortRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

fn group_by<'a>(
    population: &'a [EmployeeCohortView],
    dimension: Dimension,
    brackets: &Brackets,
) -> BTreeMap<String, Vec<&'a EmployeeCohortView>> {
    let mut groups: BTreeMap<String, Vec<&EmployeeCohortView>> = BTreeMap::new();
    for view in population {
        if let Some(label) = dimension.value(view, brackets) {
            groups.entry(label).or_default().push(view);
        }
    }
    groups
}

/// Headcount per dimension value as a share of the whole population.
///
/// Employees without a value are left out of the rows but still count in
/// `total`. Rows are ordered by count descending, then label.
pub fn distribution(
    population: &[EmployeeCohortView],
    dimension: Dimension,
    brackets: &Brackets,
) -> CohortTable {
    let total = population.len();
    let mut rows: Vec<CohortRow> = group_by(population, dimension, brackets)
        .into_iter()
        .map(|(label, members)| CohortRow {
            label,
            count: members.len(),
            total,
            percentage: percentage(members.len(), total),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    CohortTable { dimension, rows }
}

/// Rate of `predicate` within each dimension value.
///
/// Rows are ordered by group size descending, then label.
pub fn breakdown<P>(
    population: &[EmployeeCohortView],
    dimension: Dimension,
    brackets: &Brackets,
    predicate: P,
) -> CohortTable
where
    P: Fn(&EmployeeCohortView) -> bool,
{
    let mut rows: Vec<CohortRow> = group_by(population, dimension, brackets)
        .into_iter()
        .map(|(label, members)| {
            let count = members.iter().filter(|v| predicate(v)).count();
            CohortRow {
                label,
                count,
                total: members.len(),
                percentage: percentage(count, members.len()),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
    CohortTable { dimension, rows }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub percentage: f64,
}

/// Equal-width histogram over `[min, max]` of the finite values.
///
/// The last bin is closed so the maximum is counted. A constant series is
/// spread over `[v - 0.5, v + 0.5]`. No values or zero bins yield no bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
            percentage: percentage(count, finite.len()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrlens_core::Attrition;

    fn view(id: &str, department: &str, age: f64, education: u8, left: bool) -> EmployeeCohortView {
        EmployeeCohortView {
            employee_id: id.to_string(),
            department: department.to_string(),
            gender: "Female".to_string(),
            state: "CA".to_string(),
            marital_status: "Single".to_string(),
            job_role: "Analyst".to_string(),
            overtime: false,
            education,
            job_satisfaction: 3,
            stock_option_level: 0,
            age,
            distance_from_home_km: 3.0,
            salary: 50_000.0,
            years_since_last_promotion: 1.0,
            years_with_curr_manager: 1.0,
            years_in_most_recent_role: 1.0,
            average_manager_rating: 3.0,
            attrition: if left { Attrition::Yes } else { Attrition::No },
            tenure: None,
        }
    }

    #[test]
    fn distribution_counts_and_order() {
        let pop = vec![
            view("1", "Sales", 30.0, 3, false),
            view("2", "Technology", 30.0, 3, false),
            view("3", "Sales", 30.0, 3, false),
            view("4", "Human Resources", 30.0, 3, false),
        ];
        let t = distribution(&pop, Dimension::Department, &Brackets::default());
        let labels: Vec<&str> = t.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Sales", "Human Resources", "Technology"]);
        assert_eq!(t.rows[0].count, 2);
        assert_eq!(t.rows[0].total, 4);
        assert_eq!(t.rows[0].percentage, 50.0);
    }

    #[test]
    fn missing_bracket_is_excluded_but_counted_in_total() {
        let pop = vec![view("1", "Sales", 30.0, 3, false), view("2", "Sales", 70.0, 3, false)];
        let t = distribution(&pop, Dimension::AgeBracket, &Brackets::default());
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].label, "26-35");
        assert_eq!(t.rows[0].percentage, 50.0);

        let tenure = distribution(&pop, Dimension::TenureBracket, &Brackets::default());
        assert!(tenure.rows.is_empty());
    }

    #[test]
    fn unmapped_codes_get_their_own_row() {
        let pop = vec![view("1", "Sales", 30.0, 3, false), view("2", "Sales", 30.0, 9, false)];
        let t = distribution(&pop, Dimension::Education, &Brackets::default());
        assert!(t.row("unmapped(9)").is_some());
        assert_eq!(t.rows.len(), 2);
    }

    #[test]
    fn breakdown_rates_per_group() {
        let pop = vec![
            view("1", "Sales", 30.0, 3, true),
            view("2", "Sales", 30.0, 3, false),
            view("3", "Sales", 30.0, 3, false),
            view("4", "Technology", 30.0, 3, true),
        ];
        let t = breakdown(&pop, Dimension::Department, &Brackets::default(), |v| {
            v.attrition.has_left()
        });
        let sales = t.row("Sales").unwrap();
        assert_eq!((sales.count, sales.total), (1, 3));
        assert!((sales.percentage - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(t.row("Technology").unwrap().percentage, 100.0);
        assert_eq!(t.rows[0].label, "Sales");
    }

    #[test]
    fn dimension_names_round_trip() {
        for d in Dimension::ALL {
            assert_eq!(d.as_str().parse::<Dimension>().unwrap(), d);
        }
        assert_eq!("tenure-bracket".parse::<Dimension>().unwrap(), Dimension::TenureBracket);
        assert!("salary".parse::<Dimension>().is_err());
    }

    #[test]
    fn histogram_includes_max_in_last_bin() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(bins.len(), 4);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(bins[3].upper, 4.0);
        assert_eq!(bins[0].percentage, 20.0);
    }

    #[test]
    fn histogram_edge_cases() {
        assert!(histogram(&[], 10).is_empty());
        assert!(histogram(&[1.0], 0).is_empty());
        let constant = histogram(&[5.0, 5.0], 2);
        assert_eq!(constant.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(constant[0].lower, 4.5);
    }
}
