use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hrlens_compute::CohortFilter;
use hrlens_core::EmployeeStatus;

/// HR attrition dashboard reports and attrition prediction.
///
/// Loads the employee and performance-review CSVs, applies the cohort
/// rules, and prints JSON on stdout. Logs go to stderr (`RUST_LOG`).
#[derive(Parser, Debug)]
#[command(name = "hrlens", version, about)]
pub struct CliArgs {
    /// Config profile; keys resolve as {PROFILE}_{KEY} before {KEY}.
    #[arg(long, global = true, env = "HRLENS_PROFILE", default_value = "")]
    pub profile: String,

    /// Employee CSV (overrides HRLENS_EMPLOYEE_CSV).
    #[arg(long, global = true)]
    pub employees: Option<PathBuf>,

    /// Performance rating CSV (overrides HRLENS_PERFORMANCE_CSV).
    #[arg(long, global = true)]
    pub performance: Option<PathBuf>,

    /// CohortRules YAML (overrides HRLENS_RULES_PATH; embedded default otherwise).
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Headcount, attrition rate, salary and demographic distributions.
    Demographics(FilterArgs),
    /// Promotion and retrenchment candidates among active employees.
    Promotions(FilterArgs),
    /// Attrition rates and breakdowns.
    Attrition(FilterArgs),
    /// Train the attrition model and print its evaluation.
    Train(ModelArgs),
    /// Train the attrition model and predict one employee.
    Predict(PredictArgs),
    /// Validate a CohortRules document without loading any data.
    ValidateRules {
        /// Document to check; defaults to --rules or the embedded default.
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Keep only these departments (repeatable).
    #[arg(long = "department")]
    pub departments: Vec<String>,

    /// Keep only these genders (repeatable).
    #[arg(long = "gender")]
    pub genders: Vec<String>,

    /// Keep only these states (repeatable).
    #[arg(long = "state")]
    pub states: Vec<String>,

    /// active or inactive.
    #[arg(long, value_parser = parse_status)]
    pub status: Option<EmployeeStatus>,
}

fn parse_status(s: &str) -> Result<EmployeeStatus, String> {
    s.parse()
}

impl FilterArgs {
    pub fn to_filter(&self) -> CohortFilter {
        CohortFilter {
            departments: self.departments.clone(),
            genders: self.genders.clone(),
            states: self.states.clone(),
            status: self.status,
        }
    }
}

#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Seed for the train/test shuffle (overrides HRLENS_MODEL_SEED).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Held-out share (overrides HRLENS_MODEL_TEST_FRACTION).
    #[arg(long)]
    pub test_fraction: Option<f64>,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(long)]
    pub tenure: f64,

    #[arg(long)]
    pub age: f64,

    #[arg(long)]
    pub years_with_manager: f64,

    #[arg(long)]
    pub years_in_role: f64,

    #[arg(long)]
    pub years_since_promotion: f64,

    #[arg(long)]
    pub job_role: String,

    /// Works overtime.
    #[arg(long)]
    pub overtime: bool,

    #[arg(long)]
    pub marital_status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_repeatable_filters() {
        let args = CliArgs::parse_from([
            "hrlens",
            "attrition",
            "--department",
            "Sales",
            "--department",
            "Technology",
            "--status",
            "inactive",
        ]);
        match args.command {
            Command::Attrition(f) => {
                let filter = f.to_filter();
                assert_eq!(filter.departments, vec!["Sales", "Technology"]);
                assert_eq!(filter.status, Some(EmployeeStatus::Inactive));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(CliArgs::try_parse_from(["hrlens", "promotions", "--status", "retired"]).is_err());
    }
}
