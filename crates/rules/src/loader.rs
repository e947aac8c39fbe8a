//! Loads the CohortRules document from disk or from the embedded default.

use std::fs;
use std::path::Path;

use hrlens_core::config::RulesConfig;
use tracing::{info, warn};

use crate::cohort_rules::{CohortRulesRule, CompiledCohortRules};
use crate::error::{Result, RuleError};
use crate::validation::validate_rule;

/// Default document compiled into the binary.
pub const DEFAULT_RULES_YAML: &str = include_str!("../../../data/rules/cohort-rules.yml");

pub struct CohortRulesLoader;

impl CohortRulesLoader {
    /// Resolve the configured rules file, or the embedded default when none is set.
    pub fn from_config(config: &RulesConfig) -> Result<CompiledCohortRules> {
        match &config.rules_path {
            Some(path) => Self::load_file(path),
            None => Self::load_default(),
        }
    }

    pub fn load_default() -> Result<CompiledCohortRules> {
        Self::load_str(DEFAULT_RULES_YAML, "(embedded)")
    }

    pub fn load_file(path: &Path) -> Result<CompiledCohortRules> {
        let yaml = fs::read_to_string(path)?;
        Self::load_str(&yaml, &path.display().to_string())
    }

    /// Parse, validate and compile. Validation errors are fatal; warnings are logged.
    pub fn load_str(yaml: &str, source: &str) -> Result<CompiledCohortRules> {
        let rule: CohortRulesRule = serde_yaml::from_str(yaml)?;
        let result = validate_rule(&rule);
        for w in &result.warnings {
            warn!(source, path = %w.path, "{}", w.message);
        }
        if !result.valid {
            return Err(RuleError::Validation(result.error_summary()));
        }
        info!(source, rule_id = %rule.metadata.id, "loaded cohort rules");
        Ok(rule.compile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn default_when_no_path_configured() {
        let rules = CohortRulesLoader::from_config(&RulesConfig { rules_path: None }).unwrap();
        assert_eq!(rules, CompiledCohortRules::default());
    }

    #[test]
    fn file_overrides_thresholds() {
        let f = write_yaml(
            r#"
apiVersion: v1
kind: CohortRules
metadata:
  id: lenient
  name: Lenient
spec:
  retrenchment:
    min_years_since_promotion: 6
    max_average_rating: 2.5
"#,
        );
        let rules = CohortRulesLoader::from_config(&RulesConfig {
            rules_path: Some(f.path().to_path_buf()),
        })
        .unwrap();
        assert_eq!(rules.retrenchment.min_years_since_promotion, 6.0);
        assert_eq!(rules.retrenchment.max_average_rating, 2.5);
        assert_eq!(rules.promotion.min_average_rating, 3.5);
    }

    #[test]
    fn invalid_document_is_rejected() {
        let f = write_yaml(
            r#"
apiVersion: v1
kind: CohortRules
metadata:
  id: Bad_Id
  name: Bad
spec: {}
"#,
        );
        let err = CohortRulesLoader::load_file(f.path()).unwrap_err();
        match err {
            RuleError::Validation(msg) => assert!(msg.contains("metadata.id"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CohortRulesLoader::load_file(&PathBuf::from("/nonexistent/rules.yml")).unwrap_err();
        assert!(matches!(err, RuleError::Io(_)));
    }
}
