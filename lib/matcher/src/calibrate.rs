//! Confidence calibration
//!
//! Maps the best raw score onto a bounded, user-facing confidence and
//! rejects matches that are too weak to report.

use crate::scorer::{ScoreBreakdown, ScoredCandidate};
use heritage_core::MonumentId;
use serde::{Deserialize, Serialize};

/// Number of ranked candidates carried for diagnostics
pub const TOP_CANDIDATES: usize = 5;

/// Calibration thresholds and bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalibrationConfig {
    /// Top scores below this are reported as "not recognized"
    #[serde(default = "default_rejection_threshold")]
    pub rejection_threshold: f32,

    /// Scores at or above this get the confidence boost
    #[serde(default = "default_high_score_threshold")]
    pub high_score_threshold: f32,

    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    #[serde(default = "default_max_confidence")]
    pub max_confidence: f32,

    #[serde(default = "default_high_score_boost")]
    pub high_score_boost: f32,

    /// Ceiling after the boost is applied
    #[serde(default = "default_boosted_ceiling")]
    pub boosted_ceiling: f32,
}

fn default_rejection_threshold() -> f32 {
    35.0
}

fn default_high_score_threshold() -> f32 {
    70.0
}

fn default_min_confidence() -> f32 {
    0.6
}

fn default_max_confidence() -> f32 {
    0.96
}

fn default_high_score_boost() -> f32 {
    0.10
}

fn default_boosted_ceiling() -> f32 {
    0.98
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            rejection_threshold: default_rejection_threshold(),
            high_score_threshold: default_high_score_threshold(),
            min_confidence: default_min_confidence(),
            max_confidence: default_max_confidence(),
            high_score_boost: default_high_score_boost(),
            boosted_ceiling: default_boosted_ceiling(),
        }
    }
}

impl CalibrationConfig {
    /// Check that the bounds are ordered and lie in [0, 1]
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let values = [
            ("rejection_threshold", self.rejection_threshold),
            ("high_score_threshold", self.high_score_threshold),
            ("min_confidence", self.min_confidence),
            ("max_confidence", self.max_confidence),
            ("high_score_boost", self.high_score_boost),
            ("boosted_ceiling", self.boosted_ceiling),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CalibrationError::NonFinite(name.to_string()));
        }
        if !(0.0 <= self.min_confidence
            && self.min_confidence <= self.max_confidence
            && self.max_confidence <= self.boosted_ceiling
            && self.boosted_ceiling <= 1.0)
        {
            return Err(CalibrationError::UnorderedBounds);
        }
        if self.high_score_boost < 0.0 {
            return Err(CalibrationError::NegativeBoost);
        }
        if self.high_score_threshold < self.rejection_threshold {
            return Err(CalibrationError::ThresholdsInverted);
        }
        Ok(())
    }
}

/// Errors that can occur during calibration config validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    #[error("Calibration value '{0}' is not a finite number")]
    NonFinite(String),

    #[error("Expected 0 <= min_confidence <= max_confidence <= boosted_ceiling <= 1")]
    UnorderedBounds,

    #[error("high_score_boost cannot be negative")]
    NegativeBoost,

    #[error("high_score_threshold is below rejection_threshold")]
    ThresholdsInverted,
}

/// A confident identification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionResult {
    pub monument_id: MonumentId,
    pub confidence: f32,
    pub raw_score: f32,
    pub breakdown: ScoreBreakdown,
    pub top_candidates: Vec<ScoredCandidate>,
}

/// Outcome of calibrating one ranked list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Calibration {
    Recognized(RecognitionResult),
    /// Best score fell below the rejection threshold
    NoConfidentMatch { top_candidates: Vec<ScoredCandidate> },
}

impl Calibration {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Calibration::Recognized(_))
    }

    pub fn top_candidates(&self) -> &[ScoredCandidate] {
        match self {
            Calibration::Recognized(result) => &result.top_candidates,
            Calibration::NoConfidentMatch { top_candidates } => top_candidates,
        }
    }
}

/// Turns ranked candidates into a calibrated outcome
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    config: CalibrationConfig,
}

impl Calibrator {
    /// Wrap a config as is.
    ///
    /// The config is not validated here; callers loading it from outside
    /// should run [`CalibrationConfig::validate`] first. An unordered config
    /// still never panics, it just yields meaningless confidences.
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Map a raw score onto a confidence.
    ///
    /// Returns `None` when the score is below the rejection threshold.
    pub fn confidence_for(&self, raw_score: f32) -> Option<f32> {
        let cfg = &self.config;
        if !(raw_score >= cfg.rejection_threshold) {
            return None;
        }

        // max/min rather than clamp: clamp panics on unordered bounds
        let mut confidence = (raw_score / 100.0).max(cfg.min_confidence).min(cfg.max_confidence);
        if raw_score >= cfg.high_score_threshold {
            confidence = (confidence + cfg.high_score_boost).min(cfg.boosted_ceiling);
        }
        Some(confidence)
    }

    /// Calibrate a ranked list (highest score first)
    ///
    /// An empty list yields `NoConfidentMatch` with no candidates.
    pub fn calibrate(&self, ranked: &[ScoredCandidate]) -> Calibration {
        let top_candidates: Vec<ScoredCandidate> = ranked.iter().take(TOP_CANDIDATES).cloned().collect();

        let Some(best) = ranked.first() else {
            return Calibration::NoConfidentMatch { top_candidates };
        };

        match self.confidence_for(best.raw_score) {
            Some(confidence) => Calibration::Recognized(RecognitionResult {
                monument_id: best.monument_id.clone(),
                confidence,
                raw_score: best.raw_score,
                breakdown: best.breakdown,
                top_candidates,
            }),
            None => Calibration::NoConfidentMatch { top_candidates },
        }
    }
}
