//! # Heritage Lens Matcher
//!
//! Scoring and calibration for the Heritage Lens identification engine.
//!
//! This crate turns one [`FeatureDescription`](heritage_core::FeatureDescription)
//! into a ranked, explainable list of monument candidates.
//!
//! ## Features
//!
//! - **Fuzzy tag matching**: separator- and case-insensitive substring matching
//! - **Weighted scoring**: five named components with configurable weights and presets
//! - **Calibration**: bounded confidence with a rejection threshold
//! - **Explainability**: per-component breakdowns, display summaries and stats
//! - **Related monuments**: tag and location overlap between catalog entries
//!
//! ## Example
//!
//! ```rust
//! use heritage_core::{Catalog, FeatureDescription};
//! use heritage_matcher::{Calibration, Calibrator, Scorer};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let features = FeatureDescription::new()
//!     .with_colors(["white", "ivory"])
//!     .with_architecture(["mughal", "dome", "minarets"])
//!     .with_characteristics(["symmetrical", "white marble"])
//!     .with_confidence(0.8);
//!
//! let ranked = Scorer::default().score(&features, &catalog);
//! match Calibrator::default().calibrate(&ranked) {
//!     Calibration::Recognized(result) => assert_eq!(result.monument_id.as_str(), "taj-mahal"),
//!     Calibration::NoConfidentMatch { .. } => unreachable!(),
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Features   │────>│   Scorer    │────>│ Calibrator  │
//! │ (extracted) │     │  (weights)  │     │ (threshold) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                     ┌─────────────┐            │
//!                     │  Explain    │<───────────┘
//!                     │ (summaries) │
//!                     └─────────────┘
//! ```

pub mod calibrate;
pub mod explain;
pub mod fuzzy;
pub mod scorer;
pub mod similar;
pub mod weights;

// Re-export main types for convenience
pub use calibrate::{Calibration, CalibrationConfig, CalibrationError, Calibrator, RecognitionResult, TOP_CANDIDATES};
pub use explain::{CandidateSummary, ScoreStats};
pub use fuzzy::{exact_tag_match, fuzzy_tag_match, matches_any, normalize_tag};
pub use scorer::{
    fallback_score,
    MatchCounts,
    ScoreBreakdown,
    ScoredCandidate,
    Scorer,
    ScoringMethod,
    FALLBACK_CONFIDENCE,
    FALLBACK_SCORE_MAX,
    FALLBACK_SCORE_MIN,
};
pub use similar::{similar_monuments, DEFAULT_SIMILAR_LIMIT};
pub use weights::{ScoringWeights, WeightsError};
