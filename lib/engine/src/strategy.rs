use heritage_matcher::{Scorer, ScoringWeights};
use serde::{Deserialize, Serialize};

/// A named weight profile run as one ensemble voter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    #[serde(default)]
    pub weights: ScoringWeights,
}

impl Strategy {
    pub fn new(name: impl Into<String>, weights: ScoringWeights) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    /// Strategy built from a named weight preset
    pub fn preset(name: &str) -> Option<Self> {
        ScoringWeights::preset(name).map(|weights| Self::new(name, weights))
    }

    /// `balanced`, `architectural` and `color_profile`, in that order
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("balanced", ScoringWeights::balanced()),
            Self::new("architectural", ScoringWeights::architectural()),
            Self::new("color_profile", ScoringWeights::color_profile()),
        ]
    }

    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.weights)
    }
}
