use crate::monument::{MonumentCatalog, MonumentId, MonumentRecord};
use crate::signature::{MonumentSignature, SignatureCatalog};
use crate::{Error, Result};

/// Monument content paired with visual signatures
///
/// Candidate iteration follows the monument catalog's order. A monument may
/// lack a signature (it is then scored by the fallback path); a signature
/// without a monument record is a load error.
#[derive(Debug, Clone)]
pub struct Catalog {
    monuments: MonumentCatalog,
    signatures: SignatureCatalog,
}

/// A monument together with its signature, if one was authored
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub record: &'a MonumentRecord,
    pub signature: Option<&'a MonumentSignature>,
}

impl Catalog {
    pub fn new(monuments: MonumentCatalog, signatures: SignatureCatalog) -> Result<Self> {
        if monuments.is_empty() {
            return Err(Error::CatalogLoad("monument catalog is empty".to_string()));
        }
        if let Some(orphan) = signatures.all().find(|s| !monuments.contains(&s.id)) {
            return Err(Error::CatalogLoad(format!(
                "signature '{}' has no monument record",
                orphan.id
            )));
        }
        Ok(Self { monuments, signatures })
    }

    /// Built-in monuments and signatures
    pub fn builtin() -> Result<Self> {
        Self::new(MonumentCatalog::builtin()?, SignatureCatalog::builtin()?)
    }

    pub fn monuments(&self) -> &MonumentCatalog {
        &self.monuments
    }

    pub fn signatures(&self) -> &SignatureCatalog {
        &self.signatures
    }

    pub fn get_by_id(&self, id: &MonumentId) -> Option<&MonumentRecord> {
        self.monuments.get_by_id(id)
    }

    pub fn signature(&self, id: &MonumentId) -> Option<&MonumentSignature> {
        self.signatures.lookup(id)
    }

    /// Every monument in catalog order, with its signature when present
    pub fn candidates(&self) -> impl Iterator<Item = Candidate<'_>> {
        self.monuments.all().map(move |record| Candidate {
            record,
            signature: self.signatures.lookup(&record.id),
        })
    }

    pub fn len(&self) -> usize {
        self.monuments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monuments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_fully_signed() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 36);
        assert!(catalog.candidates().all(|c| c.signature.is_some()));
    }

    #[test]
    fn test_unsigned_monument_is_a_candidate() {
        let monuments = MonumentCatalog::new(vec![
            MonumentRecord::new("taj-mahal", "Taj Mahal", "Agra"),
            MonumentRecord::new("unsigned-ruin", "Unsigned Ruin", "Nowhere"),
        ])
        .unwrap();
        let signatures = SignatureCatalog::new(
            SignatureCatalog::builtin()
                .unwrap()
                .all()
                .filter(|s| s.id.as_str() == "taj-mahal")
                .cloned()
                .collect(),
        )
        .unwrap();

        let catalog = Catalog::new(monuments, signatures).unwrap();
        let candidates: Vec<_> = catalog.candidates().collect();
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].signature.is_some());
        assert!(candidates[1].signature.is_none());
    }

    #[test]
    fn test_orphan_signature_rejected() {
        let monuments = MonumentCatalog::new(vec![MonumentRecord::new("red-fort", "Red Fort", "Delhi")]).unwrap();
        let result = Catalog::new(monuments, SignatureCatalog::builtin().unwrap());
        assert!(matches!(result, Err(Error::CatalogLoad(_))));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Catalog::new(
            MonumentCatalog::new(Vec::new()).unwrap(),
            SignatureCatalog::new(Vec::new()).unwrap(),
        );
        assert!(matches!(result, Err(Error::CatalogLoad(_))));
    }
}
