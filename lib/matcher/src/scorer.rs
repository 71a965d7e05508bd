//! Signature scorer
//!
//! Scores every monument in a [`Catalog`] against one
//! [`FeatureDescription`] and returns the candidates ranked by raw score,
//! each with a per-component breakdown.

use crate::fuzzy::{exact_tag_match, normalize_tag, normalized_match};
use crate::weights::{ScoringWeights, WeightsError};
use heritage_core::{Candidate, Catalog, FeatureDescription, MonumentId, MonumentSignature};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::debug;

/// Lowest score an unsigned monument can receive
pub const FALLBACK_SCORE_MIN: f32 = 10.0;
/// Unsigned monuments always score strictly below this
pub const FALLBACK_SCORE_MAX: f32 = 35.0;
/// Signature confidence reported for unsigned monuments
pub const FALLBACK_CONFIDENCE: f32 = 0.45;

// fallback scores are drawn in hundredths across the band
const FALLBACK_STEPS: u32 = 2500;

/// How a candidate's score was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Matched against an authored signature
    Signature,
    /// No signature; deterministic pseudo-random low score
    Fallback,
}

/// Weighted score contributions of one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub unique_feature_score: f32,
    pub color_score: f32,
    pub architecture_score: f32,
    pub confidence_bonus: f32,
    pub distinguishing_bonus: f32,
    /// Only non-zero for unsigned monuments
    pub fallback_score: f32,
}

impl ScoreBreakdown {
    /// Sum of all components; equals the candidate's raw score
    pub fn total(&self) -> f32 {
        self.unique_feature_score
            + self.color_score
            + self.architecture_score
            + self.confidence_bonus
            + self.distinguishing_bonus
            + self.fallback_score
    }

    /// Components as (name, value) pairs in a fixed order
    pub fn components(&self) -> [(&'static str, f32); 6] {
        [
            ("unique_feature_score", self.unique_feature_score),
            ("color_score", self.color_score),
            ("architecture_score", self.architecture_score),
            ("confidence_bonus", self.confidence_bonus),
            ("distinguishing_bonus", self.distinguishing_bonus),
            ("fallback_score", self.fallback_score),
        ]
    }
}

/// Raw match counts behind a breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    pub unique_matches: usize,
    pub color_matches: usize,
    pub architecture_matches: usize,
    pub distinguishing_match: bool,
}

/// One scored monument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub monument_id: MonumentId,
    pub raw_score: f32,
    pub breakdown: ScoreBreakdown,
    pub matches: MatchCounts,
    pub signature_confidence: f32,
    pub method: ScoringMethod,
}

/// Feature tags normalized once per scoring pass
struct PreparedFeatures<'a> {
    colors: Vec<String>,
    characteristics: Vec<String>,
    architecture: &'a [String],
    confidence: f32,
}

impl<'a> PreparedFeatures<'a> {
    fn new(features: &'a FeatureDescription) -> Self {
        Self {
            colors: features.dominant_colors.iter().map(|c| normalize_tag(c)).collect(),
            characteristics: features
                .unique_characteristics
                .iter()
                .map(|c| normalize_tag(c))
                .collect(),
            architecture: &features.architectural_features,
            confidence: if features.extraction_confidence.is_finite() {
                features.extraction_confidence.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }
}

/// Scores feature descriptions against monument signatures
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    /// Create a new scorer with the given weights
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Get a reference to the weights
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Create a new scorer with some components replaced
    ///
    /// # Example
    /// ```ignore
    /// let scorer = Scorer::default();
    /// let color_heavy = scorer.with_weights(&HashMap::from([
    ///     ("color".to_string(), 50.0),
    /// ]))?;
    /// ```
    pub fn with_weights(&self, overrides: &HashMap<String, f32>) -> Result<Scorer, WeightsError> {
        Ok(Scorer::new(self.weights.with_overrides(overrides)?))
    }

    /// Score every monument in the catalog
    ///
    /// Returns candidates sorted by raw score, highest first. Equal scores
    /// keep catalog order.
    pub fn score(&self, features: &FeatureDescription, catalog: &Catalog) -> Vec<ScoredCandidate> {
        let prepared = PreparedFeatures::new(features);
        let candidates: Vec<Candidate<'_>> = catalog.candidates().collect();

        let mut results: Vec<ScoredCandidate> = candidates
            .par_iter()
            .map(|candidate| match candidate.signature {
                Some(signature) => self.score_prepared(&prepared, signature),
                None => {
                    debug!(monument = %candidate.record.id, "no signature, using fallback score");
                    fallback_candidate(&candidate.record.id)
                }
            })
            .collect();

        // Sort by score descending (stable)
        results.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));

        results
    }

    /// Score a single signature
    pub fn score_signature(
        &self,
        features: &FeatureDescription,
        signature: &MonumentSignature,
    ) -> ScoredCandidate {
        self.score_prepared(&PreparedFeatures::new(features), signature)
    }

    fn score_prepared(&self, features: &PreparedFeatures<'_>, signature: &MonumentSignature) -> ScoredCandidate {
        let unique: Vec<String> = signature.unique_features.iter().map(|f| normalize_tag(f)).collect();
        let palette: Vec<String> = signature.color_weights.keys().map(|c| normalize_tag(c)).collect();
        let factor = normalize_tag(&signature.distinguishing_factor);

        let unique_matches = features
            .characteristics
            .iter()
            .filter(|c| unique.iter().any(|u| normalized_match(c, u)))
            .count();

        let color_matches = features
            .colors
            .iter()
            .filter(|c| palette.iter().any(|p| normalized_match(c, p)))
            .count();

        let architecture_matches = features
            .architecture
            .iter()
            .filter(|f| signature.architecture_tags.iter().any(|t| exact_tag_match(t, f)))
            .count();

        let distinguishing_match = features
            .characteristics
            .iter()
            .any(|c| normalized_match(c, &factor));

        let breakdown = ScoreBreakdown {
            unique_feature_score: scaled(unique_matches, unique.len(), self.weights.unique_feature),
            color_score: scaled(color_matches, palette.len(), self.weights.color),
            architecture_score: scaled(
                architecture_matches,
                signature.architecture_tags.len(),
                self.weights.architecture,
            ),
            confidence_bonus: features.confidence * self.weights.confidence,
            distinguishing_bonus: if distinguishing_match {
                self.weights.distinguishing_bonus
            } else {
                0.0
            },
            fallback_score: 0.0,
        };

        ScoredCandidate {
            monument_id: signature.id.clone(),
            raw_score: breakdown.total(),
            breakdown,
            matches: MatchCounts {
                unique_matches,
                color_matches,
                architecture_matches,
                distinguishing_match,
            },
            signature_confidence: signature.base_confidence,
            method: ScoringMethod::Signature,
        }
    }
}

/// `weight × min(1, matches / total)`
fn scaled(matches: usize, total: usize, weight: f32) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let ratio = (matches as f32 / total as f32).min(1.0);
    ratio * weight
}

/// Deterministic fallback score in `[FALLBACK_SCORE_MIN, FALLBACK_SCORE_MAX)`
///
/// Seeded from the monument id so repeated scoring passes agree.
pub fn fallback_score(id: &MonumentId) -> f32 {
    let seed: [u8; 32] = Sha256::digest(id.as_str().as_bytes()).into();
    let mut rng = StdRng::from_seed(seed);
    let step = rng.random_range(0..FALLBACK_STEPS);
    FALLBACK_SCORE_MIN + step as f32 / 100.0
}

fn fallback_candidate(id: &MonumentId) -> ScoredCandidate {
    let breakdown = ScoreBreakdown {
        fallback_score: fallback_score(id),
        ..ScoreBreakdown::default()
    };
    ScoredCandidate {
        monument_id: id.clone(),
        raw_score: breakdown.total(),
        breakdown,
        matches: MatchCounts::default(),
        signature_confidence: FALLBACK_CONFIDENCE,
        method: ScoringMethod::Fallback,
    }
}
