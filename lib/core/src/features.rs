use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Upper bound on the number of dominant colours kept per image
pub const MAX_DOMINANT_COLORS: usize = 6;

pub type DominantColors = SmallVec<[String; MAX_DOMINANT_COLORS]>;

/// Structured summary of an image, produced by a feature extractor
///
/// Owned by the request that created it. Ensemble strategies each get their
/// own clone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureDescription {
    /// Most to least dominant
    #[serde(default)]
    pub dominant_colors: DominantColors,
    #[serde(default)]
    pub shapes: Vec<String>,
    #[serde(default)]
    pub architectural_features: Vec<String>,
    #[serde(default)]
    pub unique_characteristics: Vec<String>,
    #[serde(default)]
    pub extraction_confidence: f32,
}

impl FeatureDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dominant_colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_shapes<I, S>(mut self, shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shapes = shapes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_architecture<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.architectural_features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_characteristics<I, S>(mut self, characteristics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_characteristics = characteristics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.extraction_confidence = confidence;
        self
    }

    /// Enforce the description invariants.
    ///
    /// Duplicate entries keep their first occurrence, the colour list is cut
    /// to [`MAX_DOMINANT_COLORS`] and the confidence is clamped to `[0, 1]`
    /// (non-finite values become 0).
    pub fn normalized(mut self) -> Self {
        dedup_in_place(&mut self.dominant_colors);
        self.dominant_colors.truncate(MAX_DOMINANT_COLORS);
        dedup_in_place(&mut self.shapes);
        dedup_in_place(&mut self.architectural_features);
        dedup_in_place(&mut self.unique_characteristics);

        self.extraction_confidence = if self.extraction_confidence.is_finite() {
            self.extraction_confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}

fn dedup_in_place<A>(items: &mut A)
where
    A: Extend<String> + Default + IntoIterator<Item = String>,
{
    let mut seen = ahash::AHashSet::new();
    let kept: Vec<String> = std::mem::take(items)
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect();
    items.extend(kept);
}
