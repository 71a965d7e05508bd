//! Feature extractors
//!
//! Pixel-level analysis lives outside this crate. An extractor only has to
//! turn uploaded image bytes into a [`FeatureDescription`].

use crate::error::ExtractionError;
use async_trait::async_trait;
use bytes::Bytes;
use heritage_core::FeatureDescription;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Turns image bytes into a feature description
#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn extract(&self, image: Bytes) -> Result<FeatureDescription, ExtractionError>;
}

/// Returns the same description for every image
#[derive(Debug, Clone)]
pub struct StaticExtractor {
    features: FeatureDescription,
}

impl StaticExtractor {
    pub fn new(features: FeatureDescription) -> Self {
        Self { features }
    }
}

#[async_trait]
impl FeatureExtractor for StaticExtractor {
    fn name(&self) -> &str {
        "static"
    }

    async fn extract(&self, _image: Bytes) -> Result<FeatureDescription, ExtractionError> {
        Ok(self.features.clone().normalized())
    }
}

/// Reads the JSON description an external extractor wrote next to the image
#[derive(Debug, Clone)]
pub struct SidecarExtractor {
    path: PathBuf,
}

impl SidecarExtractor {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeatureExtractor for SidecarExtractor {
    fn name(&self) -> &str {
        "sidecar"
    }

    async fn extract(&self, image: Bytes) -> Result<FeatureDescription, ExtractionError> {
        debug!(path = ?self.path, image_bytes = image.len(), "reading sidecar features");

        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|e| ExtractionError::Unavailable(format!("{}: {}", self.path.display(), e)))?;

        let features: FeatureDescription =
            serde_json::from_slice(&raw).map_err(|e| ExtractionError::Malformed(e.to_string()))?;

        Ok(features.normalized())
    }
}
