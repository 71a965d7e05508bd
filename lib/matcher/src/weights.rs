//! Scoring weights
//!
//! Defines how much each score component contributes to a monument's raw
//! score. The nominal total of the four scaled components is 100; the
//! distinguishing-factor bonus sits on top, so raw scores can exceed 100.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Component weights used by the scorer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    /// Ceiling of the unique-feature component
    #[serde(default = "default_unique_feature")]
    pub unique_feature: f32,

    /// Ceiling of the colour component
    #[serde(default = "default_color")]
    pub color: f32,

    /// Ceiling of the architecture component
    #[serde(default = "default_architecture")]
    pub architecture: f32,

    /// Multiplier applied to the extraction confidence
    #[serde(default = "default_confidence")]
    pub confidence: f32,

    /// Flat bonus when the distinguishing factor is seen
    #[serde(default = "default_distinguishing_bonus")]
    pub distinguishing_bonus: f32,
}

fn default_unique_feature() -> f32 {
    40.0
}

fn default_color() -> f32 {
    30.0
}

fn default_architecture() -> f32 {
    20.0
}

fn default_confidence() -> f32 {
    10.0
}

fn default_distinguishing_bonus() -> f32 {
    25.0
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

impl ScoringWeights {
    /// The standard 40/30/20/10 split with a +25 distinguishing bonus
    pub fn balanced() -> Self {
        Self {
            unique_feature: default_unique_feature(),
            color: default_color(),
            architecture: default_architecture(),
            confidence: default_confidence(),
            distinguishing_bonus: default_distinguishing_bonus(),
        }
    }

    /// Leans on architectural vocabulary
    pub fn architectural() -> Self {
        Self {
            unique_feature: 35.0,
            color: 15.0,
            architecture: 40.0,
            confidence: 10.0,
            distinguishing_bonus: 25.0,
        }
    }

    /// Leans on the colour profile
    pub fn color_profile() -> Self {
        Self {
            unique_feature: 30.0,
            color: 50.0,
            architecture: 10.0,
            confidence: 10.0,
            distinguishing_bonus: 25.0,
        }
    }

    /// Look up a named preset
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "balanced" => Some(Self::balanced()),
            "architectural" => Some(Self::architectural()),
            "color_profile" => Some(Self::color_profile()),
            _ => None,
        }
    }

    /// Sum of the scaled components, excluding the bonus
    pub fn nominal_total(&self) -> f32 {
        self.unique_feature + self.color + self.architecture + self.confidence
    }

    /// Validate the weights
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(WeightsError::NonFinite(name.to_string()));
            }
            if value < 0.0 {
                return Err(WeightsError::NegativeWeight(name.to_string()));
            }
        }
        if self.nominal_total() <= 0.0 {
            return Err(WeightsError::ZeroTotalWeight);
        }
        Ok(())
    }

    /// Replace selected components by name.
    ///
    /// Unknown names are rejected so a typo in a config file does not
    /// silently leave a default in place.
    pub fn with_overrides(&self, overrides: &HashMap<String, f32>) -> Result<Self, WeightsError> {
        let mut modified = *self;
        for (name, value) in overrides {
            let slot = match name.as_str() {
                "unique_feature" => &mut modified.unique_feature,
                "color" => &mut modified.color,
                "architecture" => &mut modified.architecture,
                "confidence" => &mut modified.confidence,
                "distinguishing_bonus" => &mut modified.distinguishing_bonus,
                _ => return Err(WeightsError::UnknownComponent(name.clone())),
            };
            *slot = *value;
        }
        modified.validate()?;
        Ok(modified)
    }

    fn named(&self) -> [(&'static str, f32); 5] {
        [
            ("unique_feature", self.unique_feature),
            ("color", self.color),
            ("architecture", self.architecture),
            ("confidence", self.confidence),
            ("distinguishing_bonus", self.distinguishing_bonus),
        ]
    }
}

/// Errors that can occur during weight validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("Weight '{0}' is negative")]
    NegativeWeight(String),

    #[error("Weight '{0}' is not a finite number")]
    NonFinite(String),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,

    #[error("Unknown score component '{0}'")]
    UnknownComponent(String),
}
