use thiserror::Error;

/// Failure reported by a feature extractor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Extractor unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed feature description: {0}")]
    Malformed(String),
}

/// Failure of one ensemble strategy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StrategyError {
    #[error("Strategy '{strategy}' found no confident match")]
    NoConfidentMatch { strategy: String },

    #[error("Strategy '{strategy}' failed: {reason}")]
    Failed { strategy: String, reason: String },
}

impl StrategyError {
    pub fn strategy(&self) -> &str {
        match self {
            StrategyError::NoConfidentMatch { strategy } | StrategyError::Failed { strategy, .. } => strategy,
        }
    }
}

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("Feature extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("No strategy produced an identification ({} failed)", .failures.len())]
    NoConsensus { failures: Vec<StrategyError> },
}
