//! # Heritage Lens Core
//!
//! Data model for the Heritage Lens monument identification engine.
//!
//! This crate provides the static, read-only inputs every recognition
//! request shares:
//!
//! - [`SignatureCatalog`] - hand-authored visual signatures, one per monument
//! - [`MonumentCatalog`] - display content (name, location, tags)
//! - [`Catalog`] - both of the above, iterated in monument order
//! - [`OverrideTable`] - alias table resolving hints such as file names
//! - [`FeatureDescription`] - per-request output of a feature extractor
//!
//! All catalogs are loaded once at startup. A malformed entry fails the load
//! with [`Error::CatalogLoad`] or one of its siblings; nothing is mutated
//! afterwards.
//!
//! ## Example
//!
//! ```rust
//! use heritage_core::{Catalog, OverrideTable};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let overrides = OverrideTable::builtin().unwrap();
//!
//! let id = overrides.resolve("taj_mahal.jpg").unwrap();
//! assert_eq!(catalog.get_by_id(id).unwrap().name, "Taj Mahal");
//! ```

pub mod catalog;
pub mod error;
pub mod features;
pub mod monument;
pub mod overrides;
pub mod signature;

pub use catalog::{Candidate, Catalog};
pub use error::{Error, Result};
pub use features::{DominantColors, FeatureDescription, MAX_DOMINANT_COLORS};
pub use monument::{MonumentCatalog, MonumentId, MonumentRecord};
pub use overrides::{canonicalize_hint, OverrideEntry, OverrideTable, IMAGE_EXTENSIONS};
pub use signature::{MonumentSignature, SignatureCatalog};
