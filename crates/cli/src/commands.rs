use std::path::Path;

use anyhow::{bail, Context, Result};
use hrlens_compute::{AttritionModel, CohortEngine, FeatureInput};
use hrlens_core::config::ModelConfig;
use hrlens_core::Config;
use hrlens_ingest::DatasetLoader;
use hrlens_rules::{validate_yaml, CohortRulesLoader, ValidationResult, DEFAULT_RULES_YAML};
use serde::Serialize;
use tracing::info;

use crate::cli::{FilterArgs, ModelArgs, PredictArgs};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

pub fn load_engine(config: &Config) -> Result<CohortEngine> {
    let rules = CohortRulesLoader::from_config(&config.rules).context("failed to load cohort rules")?;
    let dataset = DatasetLoader::load(&config.data).with_context(|| {
        format!(
            "failed to load {} and {}",
            config.data.employee_csv.display(),
            config.data.performance_csv.display()
        )
    })?;
    Ok(CohortEngine::new(dataset, rules))
}

pub fn demographics(engine: &CohortEngine, args: &FilterArgs) -> Result<()> {
    print_json(&engine.demographics(&args.to_filter()))
}

pub fn promotions(engine: &CohortEngine, args: &FilterArgs) -> Result<()> {
    print_json(&engine.promotions(&args.to_filter()))
}

pub fn attrition(engine: &CohortEngine, args: &FilterArgs) -> Result<()> {
    print_json(&engine.attrition(&args.to_filter()))
}

fn model_config(base: &ModelConfig, args: &ModelArgs) -> ModelConfig {
    let mut cfg = base.clone();
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(fraction) = args.test_fraction {
        cfg.test_fraction = fraction;
    }
    cfg
}

fn train_model(engine: &CohortEngine, config: &ModelConfig) -> Result<AttritionModel> {
    engine.train_model(config).context("failed to train attrition model")
}

#[derive(Serialize)]
struct TrainOutput<'a> {
    schema_version: u32,
    columns: Vec<String>,
    iterations: usize,
    evaluation: &'a hrlens_compute::algorithms::ModelEvaluation,
}

pub fn train(engine: &CohortEngine, base: &ModelConfig, args: &ModelArgs) -> Result<()> {
    let model = train_model(engine, &model_config(base, args))?;
    print_json(&TrainOutput {
        schema_version: model.schema().version,
        columns: model.schema().columns(),
        iterations: model.classifier().iterations,
        evaluation: model.evaluation(),
    })
}

pub fn predict(engine: &CohortEngine, base: &ModelConfig, args: &PredictArgs) -> Result<()> {
    let model = train_model(engine, &model_config(base, &args.model))?;
    let input = FeatureInput {
        tenure: args.tenure,
        age: args.age,
        years_with_curr_manager: args.years_with_manager,
        years_in_most_recent_role: args.years_in_role,
        years_since_last_promotion: args.years_since_promotion,
        job_role: args.job_role.clone(),
        overtime: args.overtime,
        marital_status: args.marital_status.clone(),
    };
    let prediction = model.predict(&input).context("prediction failed")?;
    info!(will_leave = prediction.will_leave, "prediction complete");
    print_json(&prediction)
}

/// Print the validation result; fail when the document has errors.
pub fn validate_rules(path: Option<&Path>) -> Result<()> {
    let result: ValidationResult = match path {
        Some(p) => {
            let yaml = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            validate_yaml(&yaml)
        }
        None => validate_yaml(DEFAULT_RULES_YAML),
    };
    print_json(&result)?;
    if !result.valid {
        bail!("rules document is invalid: {}", result.error_summary());
    }
    Ok(())
}
