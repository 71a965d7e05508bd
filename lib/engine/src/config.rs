//! Engine configuration
//!
//! Loaded from JSON. Every field has a default, so an empty object is a
//! valid configuration.

use crate::strategy::Strategy;
use heritage_core::{Error, Result};
use heritage_matcher::{CalibrationConfig, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Weights used by single-path recognition
    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub calibration: CalibrationConfig,

    /// Confidence reported for a manual override
    #[serde(default = "default_override_confidence")]
    pub override_confidence: f32,

    /// Ensemble voters, run in this order
    #[serde(default = "Strategy::defaults")]
    pub strategies: Vec<Strategy>,
}

fn default_override_confidence() -> f32 {
    0.96
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            calibration: CalibrationConfig::default(),
            override_confidence: default_override_confidence(),
            strategies: Strategy::defaults(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights
            .validate()
            .map_err(|e| Error::InvalidConfig(format!("weights: {}", e)))?;

        self.calibration
            .validate()
            .map_err(|e| Error::InvalidConfig(format!("calibration: {}", e)))?;

        if !(0.0..=1.0).contains(&self.override_confidence) {
            return Err(Error::InvalidConfig(format!(
                "override_confidence {} is outside [0, 1]",
                self.override_confidence
            )));
        }

        if self.strategies.is_empty() {
            return Err(Error::InvalidConfig("at least one strategy is required".to_string()));
        }

        let mut seen = HashSet::new();
        for strategy in &self.strategies {
            if strategy.name.trim().is_empty() {
                return Err(Error::InvalidConfig("strategy name cannot be empty".to_string()));
            }
            if !seen.insert(strategy.name.as_str()) {
                return Err(Error::InvalidConfig(format!("duplicate strategy '{}'", strategy.name)));
            }
            strategy
                .weights
                .validate()
                .map_err(|e| Error::InvalidConfig(format!("strategy '{}': {}", strategy.name, e)))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_object_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.override_confidence, 0.96);
        assert_eq!(config.strategies.len(), 3);
    }

    #[test]
    fn test_partial_config() {
        let config = EngineConfig::from_json(
            r#"{
                "calibration": {"rejection_threshold": 40.0},
                "strategies": [{"name": "only", "weights": {"color": 60.0}}]
            }"#,
        )
        .unwrap();

        assert_eq!(config.calibration.rejection_threshold, 40.0);
        assert_eq!(config.calibration.high_score_threshold, 70.0);
        assert_eq!(config.strategies.len(), 1);
        assert_eq!(config.strategies[0].weights.color, 60.0);
        assert_eq!(config.strategies[0].weights.unique_feature, 40.0);
    }

    #[test]
    fn test_invalid_configs() {
        let cases = [
            r#"{"override_confidence": 1.5}"#,
            r#"{"strategies": []}"#,
            r#"{"strategies": [{"name": "a"}, {"name": "a"}]}"#,
            r#"{"strategies": [{"name": " "}]}"#,
            r#"{"weights": {"color": -3.0}}"#,
            r#"{"calibration": {"min_confidence": 0.99}}"#,
            r#"{"weights": "#,
        ];
        for json in cases {
            assert!(
                matches!(EngineConfig::from_json(json), Err(Error::InvalidConfig(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"override_confidence": 0.9}}"#).unwrap();

        let config = EngineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.override_confidence, 0.9);
    }
}
