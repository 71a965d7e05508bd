//! Monument visual signatures
//!
//! A signature is the hand-authored description of what a monument is
//! expected to look like: the traits that set it apart, its palette, its
//! architectural vocabulary and one "distinguishing factor" that earns a
//! bonus when an image shows it.

use crate::monument::MonumentId;
use crate::{Error, Result};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_SIGNATURES: &str = include_str!("../data/signatures.json");

/// Visual signature of one monument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonumentSignature {
    pub id: MonumentId,
    /// Traits that set this monument apart (`"white_marble"`)
    pub unique_features: Vec<String>,
    /// Palette tags with their authored weights
    pub color_weights: BTreeMap<String, f32>,
    /// Architectural vocabulary matched verbatim
    pub architecture_tags: Vec<String>,
    pub distinguishing_factor: String,
    /// Prior confidence in this signature, in (0, 1]
    pub base_confidence: f32,
}

impl MonumentSignature {
    /// Check the signature invariants
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidSignature {
            id: self.id.to_string(),
            reason: reason.to_string(),
        };

        if self.id.as_str().trim().is_empty() {
            return Err(invalid("empty id"));
        }
        if self.unique_features.is_empty() {
            return Err(invalid("unique_features is empty"));
        }
        if self.color_weights.is_empty() {
            return Err(invalid("color_weights is empty"));
        }
        if self.architecture_tags.is_empty() {
            return Err(invalid("architecture_tags is empty"));
        }
        if self.distinguishing_factor.trim().is_empty() {
            return Err(invalid("distinguishing_factor is empty"));
        }
        if !(self.base_confidence > 0.0 && self.base_confidence <= 1.0) {
            return Err(invalid("base_confidence must be in (0, 1]"));
        }
        if self.color_weights.values().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("color weights must be finite and non-negative"));
        }

        let mut seen = AHashSet::new();
        if !self.unique_features.iter().all(|f| seen.insert(f.as_str())) {
            return Err(invalid("duplicate unique feature"));
        }
        seen.clear();
        if !self.architecture_tags.iter().all(|t| seen.insert(t.as_str())) {
            return Err(invalid("duplicate architecture tag"));
        }

        Ok(())
    }
}

/// Immutable registry of monument signatures
///
/// Built once at startup; any malformed entry fails the whole load.
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    signatures: Vec<MonumentSignature>,
    index: AHashMap<MonumentId, usize>,
}

impl SignatureCatalog {
    pub fn new(signatures: Vec<MonumentSignature>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(signatures.len());
        for (pos, signature) in signatures.iter().enumerate() {
            signature.validate()?;
            if index.insert(signature.id.clone(), pos).is_some() {
                return Err(Error::DuplicateId(signature.id.to_string()));
            }
        }
        Ok(Self { signatures, index })
    }

    /// Signatures compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SIGNATURES)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let signatures: Vec<MonumentSignature> =
            serde_json::from_str(json).map_err(|e| Error::CatalogLoad(e.to_string()))?;
        Self::new(signatures)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn lookup(&self, id: &MonumentId) -> Option<&MonumentSignature> {
        self.index.get(id).map(|&pos| &self.signatures[pos])
    }

    /// All signatures in authored order
    pub fn all(&self) -> impl Iterator<Item = &MonumentSignature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn signature(id: &str) -> MonumentSignature {
        MonumentSignature {
            id: MonumentId::from(id),
            unique_features: vec!["tall_tower".to_string(), "tapering".to_string()],
            color_weights: BTreeMap::from([("red".to_string(), 0.4)]),
            architecture_tags: vec!["minaret".to_string()],
            distinguishing_factor: "tall_tapering_tower".to_string(),
            base_confidence: 0.9,
        }
    }

    #[test]
    fn test_builtin_signatures_are_valid() {
        let catalog = SignatureCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 36);

        for sig in catalog.all() {
            assert!(!sig.unique_features.is_empty(), "{}", sig.id);
            assert!(!sig.color_weights.is_empty(), "{}", sig.id);
            assert!(!sig.architecture_tags.is_empty(), "{}", sig.id);
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = SignatureCatalog::builtin().unwrap();
        let taj = catalog.lookup(&MonumentId::from("taj-mahal")).unwrap();
        assert_eq!(taj.distinguishing_factor, "white_marble_with_dome");
        assert!((taj.base_confidence - 0.92).abs() < 1e-6);

        assert!(catalog.lookup(&MonumentId::from("atlantis")).is_none());
    }

    #[test]
    fn test_all_is_restartable_and_ordered() {
        let catalog = SignatureCatalog::new(vec![signature("a"), signature("b")]).unwrap();
        let first: Vec<_> = catalog.all().map(|s| s.id.to_string()).collect();
        let second: Vec<_> = catalog.all().map(|s| s.id.to_string()).collect();
        assert_eq!(first, vec!["a", "b"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_collections_rejected() {
        let mut sig = signature("x");
        sig.color_weights.clear();
        assert!(matches!(
            SignatureCatalog::new(vec![sig]),
            Err(Error::InvalidSignature { .. })
        ));

        let mut sig = signature("x");
        sig.unique_features.clear();
        assert!(sig.validate().is_err());

        let mut sig = signature("x");
        sig.architecture_tags.clear();
        assert!(sig.validate().is_err());
    }

    #[test]
    fn test_confidence_bounds() {
        let mut sig = signature("x");
        sig.base_confidence = 0.0;
        assert!(sig.validate().is_err());

        sig.base_confidence = 1.0;
        assert!(sig.validate().is_ok());

        sig.base_confidence = 1.01;
        assert!(sig.validate().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = SignatureCatalog::new(vec![signature("dup"), signature("dup")]);
        assert!(matches!(result, Err(Error::DuplicateId(id)) if id == "dup"));
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{\"id\": \"broken\", \"unique_features\": 7}]").unwrap();

        let result = SignatureCatalog::from_path(file.path());
        assert!(matches!(result, Err(Error::CatalogLoad(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&vec![signature("qutub-minar")]).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = SignatureCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup(&MonumentId::from("qutub-minar")).is_some());
    }
}
