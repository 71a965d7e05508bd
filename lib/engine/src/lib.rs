//! # Heritage Lens Engine
//!
//! Async recognition pipeline on top of [`heritage_core`] and
//! [`heritage_matcher`].
//!
//! A [`Recognizer`] owns the shared catalogs and a [`FeatureExtractor`]. For
//! each upload it tries the manual override first, then extracts features
//! and either scores them once ([`Recognizer::recognize`]) or runs every
//! configured [`Strategy`] in its own tokio task and takes a vote
//! ([`Recognizer::recognize_ensemble`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use heritage_core::FeatureDescription;
//! use heritage_engine::{Outcome, Recognizer, StaticExtractor};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let features = FeatureDescription::new()
//!     .with_colors(["gold", "yellow"])
//!     .with_characteristics(["golden dome", "causeway"])
//!     .with_confidence(0.8);
//! let recognizer = Recognizer::with_builtin_data(Arc::new(StaticExtractor::new(features)))?;
//!
//! match recognizer.recognize(Bytes::new(), Some("IMG_2041.jpg")).await? {
//!     Outcome::Identified(id) => println!("{} ({:.0}%)", id.monument_name, id.confidence * 100.0),
//!     Outcome::NotRecognized { message, .. } => println!("{}", message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ensemble;
pub mod error;
pub mod extractor;
pub mod output;
pub mod recognizer;
pub mod strategy;

pub use config::EngineConfig;
pub use ensemble::{aggregate, settle_all};
pub use error::{ExtractionError, RecognitionError, StrategyError};
pub use extractor::{FeatureExtractor, SidecarExtractor, StaticExtractor};
pub use output::{DebugInfo, Identification, Outcome, RecognitionMethod, VoteTally, NOT_RECOGNIZED_MESSAGE};
pub use recognizer::Recognizer;
pub use strategy::Strategy;
