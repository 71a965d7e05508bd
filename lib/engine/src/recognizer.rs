//! Recognition pipeline
//!
//! Override → extract → score → calibrate, either as a single pass or as a
//! concurrent vote across several strategies.

use crate::config::EngineConfig;
use crate::ensemble::{aggregate, settle_all};
use crate::error::{RecognitionError, StrategyError};
use crate::extractor::FeatureExtractor;
use crate::output::{display_name, DebugInfo, Identification, Outcome, RecognitionMethod, NOT_RECOGNIZED_MESSAGE};
use bytes::Bytes;
use heritage_core::{Catalog, FeatureDescription, OverrideTable};
use heritage_matcher::{Calibration, Calibrator, CandidateSummary, Scorer};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

/// Identifies monuments in uploaded images
///
/// Catalogs are shared read-only; one `Recognizer` can serve any number of
/// concurrent requests.
pub struct Recognizer {
    catalog: Arc<Catalog>,
    overrides: Arc<OverrideTable>,
    extractor: Arc<dyn FeatureExtractor>,
    config: EngineConfig,
    scorer: Scorer,
    calibrator: Calibrator,
}

impl Recognizer {
    pub fn new(
        catalog: Arc<Catalog>,
        overrides: Arc<OverrideTable>,
        extractor: Arc<dyn FeatureExtractor>,
        config: EngineConfig,
    ) -> heritage_core::Result<Self> {
        config.validate()?;

        info!(
            monuments = catalog.len(),
            signatures = catalog.signatures().len(),
            overrides = overrides.len(),
            extractor = extractor.name(),
            "recognizer ready"
        );

        Ok(Self {
            scorer: Scorer::new(config.weights),
            calibrator: Calibrator::new(config.calibration),
            catalog,
            overrides,
            extractor,
            config,
        })
    }

    /// Recognizer over the compiled-in catalogs with default settings
    pub fn with_builtin_data(extractor: Arc<dyn FeatureExtractor>) -> heritage_core::Result<Self> {
        Self::new(
            Arc::new(Catalog::builtin()?),
            Arc::new(OverrideTable::builtin()?),
            extractor,
            EngineConfig::default(),
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Single-pass recognition
    pub async fn recognize(&self, image: Bytes, hint: Option<&str>) -> Result<Outcome, RecognitionError> {
        let span = info_span!("recognize", request_id = %Uuid::new_v4());

        async move {
            if let Some(identification) = self.resolve_override(hint) {
                return Ok(Outcome::Identified(identification));
            }

            let features = self.extract(image).await?;
            Ok(self.identify(&features))
        }
        .instrument(span)
        .await
    }

    /// Recognition by concurrent vote across the configured strategies
    pub async fn recognize_ensemble(&self, image: Bytes, hint: Option<&str>) -> Result<Outcome, RecognitionError> {
        let span = info_span!("recognize_ensemble", request_id = %Uuid::new_v4());

        async move {
            if let Some(identification) = self.resolve_override(hint) {
                return Ok(Outcome::Identified(identification));
            }

            let features = self.extract(image).await?;

            let tasks = self
                .config
                .strategies
                .iter()
                .map(|strategy| {
                    let name = strategy.name.clone();
                    let catalog = Arc::clone(&self.catalog);
                    let scorer = strategy.scorer();
                    let calibrator = self.calibrator.clone();
                    let features = features.clone();
                    let task_name = name.clone();

                    let task_span = Span::current();

                    // scoring fans out on rayon; keep it off the async workers
                    let handle = tokio::task::spawn_blocking(move || {
                        let _entered = task_span.enter();
                        let ranked = scorer.score(&features, &catalog);
                        match calibrator.calibrate(&ranked) {
                            Calibration::Recognized(result) => {
                                debug!(strategy = %task_name, monument = %result.monument_id, "strategy vote");
                                Ok(Identification::from_recognition(
                                    result,
                                    &catalog,
                                    RecognitionMethod::SignatureMatch,
                                    Some(&task_name),
                                ))
                            }
                            Calibration::NoConfidentMatch { .. } => {
                                Err(StrategyError::NoConfidentMatch { strategy: task_name })
                            }
                        }
                    });
                    (name, handle)
                })
                .collect();

            let identification = aggregate(settle_all(tasks).await)?;
            info!(
                monument = %identification.monument_id,
                confidence = identification.confidence,
                "ensemble identified monument"
            );
            Ok(Outcome::Identified(identification))
        }
        .instrument(span)
        .await
    }

    /// Score an already extracted description with the configured weights
    pub fn identify(&self, features: &FeatureDescription) -> Outcome {
        let ranked = self.scorer.score(features, &self.catalog);

        match self.calibrator.calibrate(&ranked) {
            Calibration::Recognized(result) => {
                info!(
                    monument = %result.monument_id,
                    raw_score = result.raw_score,
                    confidence = result.confidence,
                    "identified monument"
                );
                Outcome::Identified(Identification::from_recognition(
                    result,
                    &self.catalog,
                    RecognitionMethod::SignatureMatch,
                    None,
                ))
            }
            Calibration::NoConfidentMatch { top_candidates } => {
                info!(
                    best_score = top_candidates.first().map(|c| c.raw_score),
                    "no confident match"
                );
                Outcome::NotRecognized {
                    message: NOT_RECOGNIZED_MESSAGE.to_string(),
                    top_candidates: CandidateSummary::from_scored_list(&top_candidates, &self.catalog),
                }
            }
        }
    }

    /// Manual override from the upload hint, if it names a catalogued monument
    pub fn resolve_override(&self, hint: Option<&str>) -> Option<Identification> {
        let hint = hint?;
        let id = self.overrides.resolve(hint)?;

        if self.catalog.get_by_id(id).is_none() {
            warn!(hint, monument = %id, "override target not in catalog, ignoring");
            return None;
        }

        info!(hint, monument = %id, "manual override");
        Some(Identification {
            monument_id: id.clone(),
            monument_name: display_name(&self.catalog, id),
            confidence: self.config.override_confidence,
            debug_info: DebugInfo {
                distinguishing_factor: self.catalog.signature(id).map(|s| s.distinguishing_factor.clone()),
                ..DebugInfo::new(RecognitionMethod::ManualOverride)
            },
        })
    }

    async fn extract(&self, image: Bytes) -> Result<FeatureDescription, RecognitionError> {
        debug!(extractor = self.extractor.name(), image_bytes = image.len(), "extracting features");
        let features = self.extractor.extract(image).await?;
        Ok(features.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::extractor::StaticExtractor;
    use crate::strategy::Strategy;
    use async_trait::async_trait;
    use heritage_core::{MonumentId, OverrideEntry};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every call and counts how often it was asked
    #[derive(Default)]
    struct FailingExtractor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeatureExtractor for FailingExtractor {
        fn name(&self) -> &str {
            "failing"
        }

        async fn extract(&self, _image: Bytes) -> Result<FeatureDescription, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ExtractionError::Unavailable("vision service down".to_string()))
        }
    }

    fn taj_features() -> FeatureDescription {
        FeatureDescription::new()
            .with_colors(["white", "ivory", "gray"])
            .with_architecture(["mughal", "dome", "minarets"])
            .with_characteristics(["symmetrical", "white marble"])
            .with_confidence(0.8)
    }

    fn recognizer(features: FeatureDescription) -> Recognizer {
        Recognizer::with_builtin_data(Arc::new(StaticExtractor::new(features))).unwrap()
    }

    #[tokio::test]
    async fn test_override_short_circuits_extraction() {
        let extractor = Arc::new(FailingExtractor::default());
        let recognizer = Recognizer::with_builtin_data(extractor.clone()).unwrap();

        let outcome = recognizer
            .recognize(Bytes::from_static(b"jpeg"), Some("taj_mahal.jpg"))
            .await
            .unwrap();

        let identification = outcome.identification().unwrap();
        assert_eq!(identification.monument_id.as_str(), "taj-mahal");
        assert_eq!(identification.monument_name, "Taj Mahal");
        assert_eq!(identification.confidence, 0.96);
        assert_eq!(identification.debug_info.method, RecognitionMethod::ManualOverride);
        assert_eq!(
            identification.debug_info.distinguishing_factor.as_deref(),
            Some("white_marble_with_dome")
        );
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_signature_match() {
        let outcome = recognizer(taj_features()).recognize(Bytes::new(), None).await.unwrap();

        let identification = outcome.identification().unwrap();
        assert_eq!(identification.monument_id.as_str(), "taj-mahal");
        // raw 88 -> 0.88 + 0.10, capped
        assert!((identification.confidence - 0.98).abs() < 1e-6);
        assert_eq!(identification.debug_info.method, RecognitionMethod::SignatureMatch);
        assert_eq!(identification.debug_info.top_candidates.len(), 5);
        assert!((identification.debug_info.raw_score.unwrap() - 88.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_unmatched_hint_falls_through() {
        let outcome = recognizer(taj_features())
            .recognize(Bytes::new(), Some("IMG_0001.jpg"))
            .await
            .unwrap();
        assert_eq!(
            outcome.identification().unwrap().debug_info.method,
            RecognitionMethod::SignatureMatch
        );
    }

    #[tokio::test]
    async fn test_weak_features_not_recognized() {
        let outcome = recognizer(FeatureDescription::new().with_colors(["green"]).with_confidence(0.3))
            .recognize(Bytes::new(), None)
            .await
            .unwrap();

        match outcome {
            Outcome::NotRecognized { message, top_candidates } => {
                assert_eq!(message, NOT_RECOGNIZED_MESSAGE);
                assert_eq!(top_candidates.len(), 5);
            }
            Outcome::Identified(id) => panic!("unexpected identification {:?}", id),
        }
    }

    #[tokio::test]
    async fn test_extraction_failure_propagates() {
        let recognizer = Recognizer::with_builtin_data(Arc::new(FailingExtractor::default())).unwrap();

        let err = recognizer.recognize(Bytes::new(), None).await.unwrap_err();
        assert!(matches!(err, RecognitionError::Extraction(ExtractionError::Unavailable(_))));

        let err = recognizer.recognize_ensemble(Bytes::new(), None).await.unwrap_err();
        assert!(matches!(err, RecognitionError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_override_target_missing_falls_through() {
        let overrides = OverrideTable::new(vec![OverrideEntry {
            alias: "atlantis".to_string(),
            monument: MonumentId::from("atlantis"),
        }])
        .unwrap();
        let recognizer = Recognizer::new(
            Arc::new(Catalog::builtin().unwrap()),
            Arc::new(overrides),
            Arc::new(StaticExtractor::new(taj_features())),
            EngineConfig::default(),
        )
        .unwrap();

        let outcome = recognizer.recognize(Bytes::new(), Some("atlantis.png")).await.unwrap();
        assert_eq!(outcome.identification().unwrap().monument_id.as_str(), "taj-mahal");
    }

    #[tokio::test]
    async fn test_ensemble_agreement() {
        let outcome = recognizer(taj_features())
            .recognize_ensemble(Bytes::new(), None)
            .await
            .unwrap();

        let identification = outcome.identification().unwrap();
        assert_eq!(identification.monument_id.as_str(), "taj-mahal");
        assert_eq!(identification.debug_info.method, RecognitionMethod::Ensemble);
        assert!((identification.confidence - 0.98).abs() < 1e-6);

        let votes = &identification.debug_info.votes;
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].votes, 3);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_concurrent_ensembles_on_single_worker() {
        let recognizer = recognizer(taj_features());

        // strategy scoring runs on the blocking pool, so one async worker
        // can drive several ensemble requests at once
        let (first, second) = tokio::join!(
            recognizer.recognize_ensemble(Bytes::new(), None),
            recognizer.recognize_ensemble(Bytes::new(), Some("IMG_0001.jpg")),
        );

        for outcome in [first.unwrap(), second.unwrap()] {
            let identification = outcome.identification().unwrap();
            assert_eq!(identification.monument_id.as_str(), "taj-mahal");
            assert_eq!(identification.debug_info.votes[0].votes, 3);
        }
    }

    #[tokio::test]
    async fn test_ensemble_no_consensus() {
        let err = recognizer(FeatureDescription::new().with_confidence(0.2))
            .recognize_ensemble(Bytes::new(), None)
            .await
            .unwrap_err();

        match err {
            RecognitionError::NoConsensus { failures } => {
                let names: Vec<_> = failures.iter().map(|f| f.strategy()).collect();
                assert_eq!(names, vec!["balanced", "architectural", "color_profile"]);
            }
            other => panic!("expected NoConsensus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ensemble_respects_override() {
        let extractor = Arc::new(FailingExtractor::default());
        let recognizer = Recognizer::with_builtin_data(extractor.clone()).unwrap();

        let outcome = recognizer
            .recognize_ensemble(Bytes::new(), Some("Golden Temple"))
            .await
            .unwrap();
        assert_eq!(outcome.identification().unwrap().monument_id.as_str(), "golden-temple");
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = EngineConfig {
            strategies: vec![Strategy::preset("balanced").unwrap(), Strategy::preset("balanced").unwrap()],
            ..EngineConfig::default()
        };
        let result = Recognizer::new(
            Arc::new(Catalog::builtin().unwrap()),
            Arc::new(OverrideTable::builtin().unwrap()),
            Arc::new(StaticExtractor::new(taj_features())),
            config,
        );
        assert!(result.is_err());
    }
}
