use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub data: DataConfig,
    pub rules: RulesConfig,
    pub model: ModelConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `HRLENS_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("HRLENS_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            data: DataConfig::from_env_profiled(p),
            rules: RulesConfig::from_env_profiled(p),
            model: ModelConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  data:   employees={}, performance={}",
            self.data.employee_csv.display(),
            self.data.performance_csv.display()
        );
        tracing::info!(
            "  rules:  path={}",
            self.rules
                .rules_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(embedded default)".to_string())
        );
        tracing::info!(
            "  model:  test_fraction={}, seed={}, max_iter={}, c={}",
            self.model.test_fraction,
            self.model.seed,
            self.model.max_iterations,
            self.model.c
        );
    }
}

// ── Data ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub employee_csv: PathBuf,
    pub performance_csv: PathBuf,
}

impl DataConfig {
    fn from_env_profiled(p: &str) -> Self {
        let data_dir = PathBuf::from(profiled_env_or(p, "HRLENS_DATA_DIR", "data"));
        let employee_csv = profiled_env_opt(p, "HRLENS_EMPLOYEE_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("Employee.csv"));
        let performance_csv = profiled_env_opt(p, "HRLENS_PERFORMANCE_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("PerformanceRating.csv"));
        Self {
            data_dir,
            employee_csv,
            performance_csv,
        }
    }
}

// ── Rules ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// CohortRules YAML file. `None` selects the embedded default document.
    pub rules_path: Option<PathBuf>,
}

impl RulesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            rules_path: profiled_env_opt(p, "HRLENS_RULES_PATH").map(PathBuf::from),
        }
    }
}

// ── Attrition model ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Share of employees held out for evaluation.
    pub test_fraction: f64,
    pub seed: u64,
    pub max_iterations: usize,
    /// Inverse L2 regularisation strength.
    pub c: f64,
    /// Gradient-norm convergence threshold.
    pub tolerance: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            max_iterations: 1000,
            c: 1.0,
            tolerance: 1e-6,
        }
    }
}

impl ModelConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            test_fraction: profiled_env_parse(p, "HRLENS_MODEL_TEST_FRACTION", d.test_fraction),
            seed: profiled_env_parse(p, "HRLENS_MODEL_SEED", d.seed),
            max_iterations: profiled_env_parse(p, "HRLENS_MODEL_MAX_ITER", d.max_iterations),
            c: profiled_env_parse(p, "HRLENS_MODEL_C", d.c),
            tolerance: profiled_env_parse(p, "HRLENS_MODEL_TOLERANCE", d.tolerance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_defaults() {
        let m = ModelConfig::default();
        assert_eq!(m.seed, 42);
        assert_eq!(m.max_iterations, 1000);
        assert!((m.test_fraction - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn profiled_lookup_prefers_prefixed_key() {
        // Unique key names so parallel tests don't collide.
        env::set_var("HRLENS_TEST_ONLY_KEY", "base");
        env::set_var("QA_HRLENS_TEST_ONLY_KEY", "qa");
        assert_eq!(profiled_env_or("QA", "HRLENS_TEST_ONLY_KEY", "x"), "qa");
        assert_eq!(profiled_env_or("", "HRLENS_TEST_ONLY_KEY", "x"), "base");
        assert_eq!(profiled_env_or("", "HRLENS_TEST_ONLY_MISSING", "x"), "x");
    }

    #[test]
    fn default_data_paths_live_under_data_dir() {
        let cfg = Config::for_profile("HRLENS_UNUSED_PROFILE");
        if env_opt("HRLENS_EMPLOYEE_CSV").is_none() && env_opt("HRLENS_DATA_DIR").is_none() {
            assert_eq!(cfg.data.employee_csv, PathBuf::from("data/Employee.csv"));
            assert_eq!(
                cfg.data.performance_csv,
                PathBuf::from("data/PerformanceRating.csv")
            );
        }
        assert_eq!(cfg.profile_label(), "HRLENS_UNUSED_PROFILE");
    }
}
