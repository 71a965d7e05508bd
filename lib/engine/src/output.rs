//! Public result types
//!
//! Everything here serializes to JSON for the CLI and for callers that hand
//! the result straight to a client.

use heritage_core::{Catalog, MonumentId};
use heritage_matcher::{CandidateSummary, RecognitionResult, ScoreBreakdown};
use serde::Serialize;

/// Shown when no monument clears the rejection threshold
pub const NOT_RECOGNIZED_MESSAGE: &str = "We couldn't identify this monument. Please try another image.";

/// How an identification was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionMethod {
    /// Resolved from the upload hint, no extraction
    ManualOverride,
    /// Single weighted scoring pass
    SignatureMatch,
    /// Vote across several strategies
    Ensemble,
}

/// Per-monument vote tally of an ensemble run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteTally {
    pub monument_id: MonumentId,
    pub monument_name: String,
    pub votes: usize,
    pub mean_confidence: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugInfo {
    pub method: RecognitionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    pub top_candidates: Vec<CandidateSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinguishing_factor: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<VoteTally>,
}

impl DebugInfo {
    pub fn new(method: RecognitionMethod) -> Self {
        Self {
            method,
            strategy: None,
            raw_score: None,
            breakdown: None,
            top_candidates: Vec::new(),
            distinguishing_factor: None,
            votes: Vec::new(),
        }
    }
}

/// A monument identification
#[derive(Debug, Clone, Serialize)]
pub struct Identification {
    pub monument_id: MonumentId,
    pub monument_name: String,
    pub confidence: f32,
    pub debug_info: DebugInfo,
}

impl Identification {
    /// Build an identification from a calibrated result
    pub(crate) fn from_recognition(
        result: RecognitionResult,
        catalog: &Catalog,
        method: RecognitionMethod,
        strategy: Option<&str>,
    ) -> Self {
        let monument_name = display_name(catalog, &result.monument_id);
        let distinguishing_factor = catalog
            .signature(&result.monument_id)
            .map(|s| s.distinguishing_factor.clone());

        Self {
            debug_info: DebugInfo {
                strategy: strategy.map(str::to_string),
                raw_score: Some(result.raw_score),
                breakdown: Some(result.breakdown),
                top_candidates: CandidateSummary::from_scored_list(&result.top_candidates, catalog),
                distinguishing_factor,
                ..DebugInfo::new(method)
            },
            monument_id: result.monument_id,
            monument_name,
            confidence: result.confidence,
        }
    }
}

/// Result of one recognition request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Identified(Identification),
    NotRecognized {
        message: String,
        top_candidates: Vec<CandidateSummary>,
    },
}

impl Outcome {
    pub fn identification(&self) -> Option<&Identification> {
        match self {
            Outcome::Identified(identification) => Some(identification),
            Outcome::NotRecognized { .. } => None,
        }
    }

    pub fn is_identified(&self) -> bool {
        self.identification().is_some()
    }
}

pub(crate) fn display_name(catalog: &Catalog, id: &MonumentId) -> String {
    catalog
        .get_by_id(id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| id.to_string())
}
