//! # Heritage Lens
//!
//! Identifies Indian heritage monuments from a description of an uploaded
//! photo.
//!
//! Each known monument carries a hand-authored visual signature. An image is
//! reduced to a [`FeatureDescription`] by an external extractor, scored
//! against every signature, and the best candidate is reported with a
//! calibrated confidence and a per-component score breakdown. A file name or
//! typed hint that names a monument short-circuits the whole pipeline.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! heritage-lens --features features.json --image IMG_2041.jpg
//! heritage-lens --features features.json --ensemble
//! heritage-lens --similar taj-mahal
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use heritage_lens::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let features = FeatureDescription::new()
//!     .with_colors(["white", "ivory"])
//!     .with_architecture(["mughal", "dome", "minarets"])
//!     .with_characteristics(["symmetrical", "white marble"])
//!     .with_confidence(0.8);
//!
//! let ranked = Scorer::default().score(&features, &catalog);
//! let calibration = Calibrator::default().calibrate(&ranked);
//! assert!(calibration.is_recognized());
//! ```
//!
//! ## Crate Structure
//!
//! - `heritage-core` - Catalogs, signatures, overrides and feature descriptions
//! - `heritage-matcher` - Fuzzy matching, weighted scoring, calibration, explain output
//! - `heritage-engine` - Async pipeline, extractors and ensemble voting

// Re-export core types
pub use heritage_core::{
    canonicalize_hint, Catalog, Error, FeatureDescription, MonumentCatalog, MonumentId, MonumentRecord,
    MonumentSignature, OverrideEntry, OverrideTable, Result, SignatureCatalog,
};

// Re-export matcher
pub use heritage_matcher::{
    fuzzy_tag_match, similar_monuments, Calibration, CalibrationConfig, Calibrator, CandidateSummary, ScoreBreakdown,
    ScoreStats, ScoredCandidate, Scorer, ScoringMethod, ScoringWeights,
};

// Re-export engine
pub use heritage_engine::{
    EngineConfig, ExtractionError, FeatureExtractor, Identification, Outcome, RecognitionError, RecognitionMethod,
    Recognizer, SidecarExtractor, StaticExtractor, Strategy, StrategyError,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Calibration, Calibrator, Catalog, EngineConfig, Error, FeatureDescription, FeatureExtractor, Identification,
        MonumentId, Outcome, OverrideTable, RecognitionError, Recognizer, Result, Scorer, ScoringWeights,
        StaticExtractor,
    };
}
