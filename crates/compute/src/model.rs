//! Attrition classifier trained on per-employee views.

use hrlens_core::config::ModelConfig;
use serde::Serialize;
use tracing::{debug, info};

use crate::algorithms::{
    train_test_split, ConfusionMatrix, LogisticParams, LogisticRegression, ModelEvaluation,
    StandardScaler,
};
use crate::error::{ComputeError, Result};
use crate::pipeline::{EmployeeCohortView, FeatureInput, FeatureSchema};

/// Outcome of a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub will_leave: bool,
    /// Probability of the predicted outcome: P(leave) when `will_leave`,
    /// otherwise P(stay).
    pub probability: f64,
    pub leave_probability: f64,
}

/// Schema, scaler and classifier fitted together. Lives only in memory.
#[derive(Debug, Clone)]
pub struct AttritionModel {
    schema: FeatureSchema,
    scaler: StandardScaler,
    classifier: LogisticRegression,
    evaluation: ModelEvaluation,
}

impl AttritionModel {
    /// Train on `views`, holding out a seeded test split for evaluation.
    ///
    /// Employees with unknown tenure are skipped.
    pub fn train(views: &[EmployeeCohortView], config: &ModelConfig) -> Result<Self> {
        if !(0.0..1.0).contains(&config.test_fraction) {
            return Err(ComputeError::InvalidParameter(format!(
                "test_fraction must be in [0, 1), got {}",
                config.test_fraction
            )));
        }
        if !(config.c > 0.0 && config.c.is_finite()) {
            return Err(ComputeError::InvalidParameter(format!(
                "C must be a positive number, got {}",
                config.c
            )));
        }

        let (inputs, labels): (Vec<FeatureInput>, Vec<bool>) = views
            .iter()
            .filter_map(|v| FeatureInput::from_view(v).map(|input| (input, v.attrition.has_left())))
            .unzip();
        if inputs.is_empty() {
            return Err(ComputeError::NoTrainingRows);
        }
        debug!(
            usable = inputs.len(),
            skipped = views.len() - inputs.len(),
            "collected training rows"
        );

        let schema = FeatureSchema::fit(&inputs);
        let encoded = inputs
            .iter()
            .map(|i| schema.encode(i))
            .collect::<Result<Vec<_>>>()?;

        let (train_idx, test_idx) =
            train_test_split(encoded.len(), config.test_fraction, config.seed);
        let train_x: Vec<Vec<f64>> = train_idx.iter().map(|&i| encoded[i].clone()).collect();
        let train_y: Vec<bool> = train_idx.iter().map(|&i| labels[i]).collect();

        match (train_y.iter().any(|&y| y), train_y.iter().any(|&y| !y)) {
            (false, false) => return Err(ComputeError::NoTrainingRows),
            (false, true) => return Err(ComputeError::SingleClass("No")),
            (true, false) => return Err(ComputeError::SingleClass("Yes")),
            (true, true) => {}
        }

        let scaler = StandardScaler::fit(&train_x);
        let targets: Vec<f64> = train_y.iter().map(|&y| if y { 1.0 } else { 0.0 }).collect();
        let params = LogisticParams {
            c: config.c,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            ..LogisticParams::default()
        };
        let classifier = LogisticRegression::fit(&scaler.transform(&train_x), &targets, &params);

        let actual: Vec<bool> = test_idx.iter().map(|&i| labels[i]).collect();
        let predicted: Vec<bool> = test_idx
            .iter()
            .map(|&i| classifier.predict(&scaler.transform_row(&encoded[i])))
            .collect();
        let evaluation = ModelEvaluation::new(
            train_idx.len(),
            ConfusionMatrix::from_predictions(&actual, &predicted),
        );

        info!(
            train = evaluation.train_size,
            test = evaluation.test_size,
            iterations = classifier.iterations,
            accuracy = evaluation.accuracy,
            "trained attrition model"
        );

        Ok(Self {
            schema,
            scaler,
            classifier,
            evaluation,
        })
    }

    pub fn predict(&self, input: &FeatureInput) -> Result<Prediction> {
        let row = self.scaler.transform_row(&self.schema.encode(input)?);
        let leave = self.classifier.predict_proba(&row);
        let will_leave = leave > 0.5;
        Ok(Prediction {
            will_leave,
            probability: if will_leave { leave } else { 1.0 - leave },
            leave_probability: leave,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn evaluation(&self) -> &ModelEvaluation {
        &self.evaluation
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }
}
