use serde::{Deserialize, Serialize};

/// Training parameters for [`LogisticRegression::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticParams {
    /// Inverse L2 regularisation strength.
    pub c: f64,
    pub max_iterations: usize,
    /// Stop once the gradient norm falls below this.
    pub tolerance: f64,
    pub learning_rate: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iterations: 1000,
            tolerance: 1e-6,
            learning_rate: 0.1,
        }
    }
}

/// Binary logistic regression with an L2 penalty on the weights (not the
/// intercept), trained by full-batch gradient descent on
/// `mean(log_loss) + ||w||² / (2 C n)`.
///
/// The step is capped at `1 / L`, where `L = max(||x||² + 1) / 4 + 1 / (C n)`
/// bounds the curvature of that objective, so small `C` cannot diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Gradient steps actually taken.
    pub iterations: usize,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl LogisticRegression {
    /// Fit on rows `x` with 0/1 labels `y`. Deterministic: weights start at zero.
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &LogisticParams) -> Self {
        let dim = x.first().map_or(0, Vec::len);
        let mut model = Self {
            weights: vec![0.0; dim],
            intercept: 0.0,
            iterations: 0,
        };
        if x.is_empty() {
            return model;
        }

        let n = x.len() as f64;
        let penalty = 1.0 / (params.c * n);
        let max_sq_norm = x.iter().map(|row| dot(row, row) + 1.0).fold(0.0, f64::max);
        let step = params.learning_rate.min(1.0 / (0.25 * max_sq_norm + penalty));
        let mut grad_w = vec![0.0; dim];

        for _ in 0..params.max_iterations {
            grad_w.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_b = 0.0;

            for (row, &target) in x.iter().zip(y) {
                let err = model.predict_proba(row) - target;
                for (g, v) in grad_w.iter_mut().zip(row) {
                    *g += err * v;
                }
                grad_b += err;
            }
            for (g, w) in grad_w.iter_mut().zip(&model.weights) {
                *g = *g / n + penalty * w;
            }
            grad_b /= n;

            let norm = (dot(&grad_w, &grad_w) + grad_b * grad_b).sqrt();
            if norm < params.tolerance {
                break;
            }

            for (w, g) in model.weights.iter_mut().zip(&grad_w) {
                *w -= step * g;
            }
            model.intercept -= step * grad_b;
            model.iterations += 1;
        }

        model
    }

    /// P(label = 1).
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, row) + self.intercept)
    }

    pub fn predict(&self, row: &[f64]) -> bool {
        self.predict_proba(row) > 0.5
    }
}
