//! Explainability for scored candidates
//!
//! Provides display-ready summaries of ranked candidates so a caller can
//! show why a monument was (or was not) picked.

use crate::scorer::{MatchCounts, ScoreBreakdown, ScoredCandidate, ScoringMethod};
use heritage_core::{Catalog, MonumentId};
use serde::Serialize;

/// A scored candidate resolved against the monument catalog
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSummary {
    pub monument_id: MonumentId,
    /// Display name; falls back to the id when the record is missing
    pub name: String,
    /// Raw score rounded to one decimal
    pub score: f32,
    /// Signature confidence as a percentage, one decimal
    pub confidence_pct: f32,
    pub method: ScoringMethod,
    pub breakdown: ScoreBreakdown,
    pub matches: MatchCounts,
}

impl CandidateSummary {
    pub fn from_scored(candidate: &ScoredCandidate, catalog: &Catalog) -> Self {
        let name = catalog
            .get_by_id(&candidate.monument_id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| candidate.monument_id.to_string());

        Self {
            monument_id: candidate.monument_id.clone(),
            name,
            score: round1(candidate.raw_score),
            confidence_pct: round1(candidate.signature_confidence * 100.0),
            method: candidate.method,
            breakdown: candidate.breakdown,
            matches: candidate.matches,
        }
    }

    pub fn from_scored_list(candidates: &[ScoredCandidate], catalog: &Catalog) -> Vec<Self> {
        candidates.iter().map(|c| Self::from_scored(c, catalog)).collect()
    }
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Summary statistics for one scoring pass
#[derive(Debug, Clone, Serialize)]
pub struct ScoreStats {
    /// Number of candidates scored
    pub candidates_count: usize,
    /// Candidates scored by the fallback path
    pub fallback_count: usize,
    pub avg_score: f32,
    pub best_score: f32,
    /// Component that contributed most to the best candidate
    pub top_contributing_component: Option<String>,
}

impl ScoreStats {
    /// Compute stats from ranked candidates (highest first)
    pub fn compute(ranked: &[ScoredCandidate]) -> Self {
        if ranked.is_empty() {
            return Self {
                candidates_count: 0,
                fallback_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_component: None,
            };
        }

        let total: f32 = ranked.iter().map(|c| c.raw_score).sum();
        let avg_score = total / ranked.len() as f32;
        let best_score = ranked[0].raw_score; // ranked input

        let top_contributing_component = ranked[0]
            .breakdown
            .components()
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| name.to_string());

        Self {
            candidates_count: ranked.len(),
            fallback_count: ranked.iter().filter(|c| c.method == ScoringMethod::Fallback).count(),
            avg_score,
            best_score,
            top_contributing_component,
        }
    }
}
