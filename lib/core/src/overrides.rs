//! Alias overrides
//!
//! A client-supplied hint (usually the uploaded file name) can name the
//! monument outright. The table maps canonical alias keys to monument ids
//! and is consulted before any scoring happens.
//!
//! Resolution order:
//! 1. exact key match
//! 2. first entry, in table order, whose key is a substring of the hint or
//!    contains the hint
//!
//! Partial matching is first-match-wins, so the authored order of the
//! table decides between overlapping aliases.

use crate::monument::MonumentId;
use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_OVERRIDES: &str = include_str!("../data/overrides.json");

/// Image extensions stripped from hints before matching
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// One alias entry as authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub alias: String,
    pub monument: MonumentId,
}

/// Canonicalize a hint into an override key.
///
/// Strips a trailing image extension (case-insensitive), lower-cases,
/// collapses runs of `_`, `-` and whitespace into a single `_`, and trims
/// surrounding separators.
pub fn canonicalize_hint(hint: &str) -> String {
    let trimmed = hint.trim();
    let stem = match trimmed.rsplit_once('.') {
        Some((stem, ext)) if IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)) => stem,
        _ => trimmed,
    };

    let mut key = String::with_capacity(stem.len());
    let mut in_separator = false;
    for ch in stem.chars().flat_map(char::to_lowercase) {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !in_separator {
                key.push('_');
                in_separator = true;
            }
        } else {
            key.push(ch);
            in_separator = false;
        }
    }

    key.trim_matches('_').to_string()
}

/// Static alias table, read-only after load
#[derive(Debug, Clone)]
pub struct OverrideTable {
    entries: Vec<OverrideEntry>,
    exact: AHashMap<String, usize>,
}

impl OverrideTable {
    pub fn new(entries: Vec<OverrideEntry>) -> Result<Self> {
        let mut exact = AHashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            let key = canonicalize_hint(&entry.alias);
            if key.is_empty() {
                return Err(Error::CatalogLoad(format!(
                    "override alias for '{}' is empty",
                    entry.monument
                )));
            }
            if key != entry.alias {
                return Err(Error::CatalogLoad(format!(
                    "override alias '{}' is not canonical (expected '{}')",
                    entry.alias, key
                )));
            }
            if exact.insert(key, pos).is_some() {
                return Err(Error::DuplicateId(entry.alias.clone()));
            }
        }
        Ok(Self { entries, exact })
    }

    /// Alias table compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_OVERRIDES)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<OverrideEntry> =
            serde_json::from_str(json).map_err(|e| Error::CatalogLoad(e.to_string()))?;
        Self::new(entries)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Resolve a hint to a monument id, if any alias applies
    ///
    /// A hint that canonicalizes to nothing (`""`, `".jpg"`, `"-"`) is
    /// treated as absent rather than as a substring of every alias.
    pub fn resolve(&self, hint: &str) -> Option<&MonumentId> {
        let key = canonicalize_hint(hint);
        if key.is_empty() {
            return None;
        }

        if let Some(&pos) = self.exact.get(&key) {
            return Some(&self.entries[pos].monument);
        }

        self.entries
            .iter()
            .find(|entry| key.contains(entry.alias.as_str()) || entry.alias.contains(key.as_str()))
            .map(|entry| &entry.monument)
    }

    /// All aliases in table order
    pub fn entries(&self) -> &[OverrideEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(alias: &str, monument: &str) -> OverrideEntry {
        OverrideEntry {
            alias: alias.to_string(),
            monument: MonumentId::from(monument),
        }
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize_hint("taj_mahal.jpg"), "taj_mahal");
        assert_eq!(canonicalize_hint("Taj-Mahal.JPEG"), "taj_mahal");
        assert_eq!(canonicalize_hint("  Red -- Fort  _ view.png"), "red_fort_view");
        assert_eq!(canonicalize_hint("gateway.of.india.webp"), "gateway.of.india");
        assert_eq!(canonicalize_hint("notes.txt"), "notes.txt");
        assert_eq!(canonicalize_hint("__hampi__"), "hampi");
        assert_eq!(canonicalize_hint(".jpg"), "");
    }

    #[test]
    fn test_exact_override() {
        let table = OverrideTable::builtin().unwrap();
        assert_eq!(table.resolve("taj_mahal.jpg").map(|id| id.as_str()), Some("taj-mahal"));
        assert_eq!(table.resolve("Lal Qila.png").map(|id| id.as_str()), Some("red-fort"));
    }

    #[test]
    fn test_exact_beats_partial() {
        // "taj" is a substring of "taj_mahal" and appears earlier in the
        // partial scan, but the exact key wins.
        let table = OverrideTable::new(vec![
            entry("taj", "first"),
            entry("taj_mahal", "second"),
        ])
        .unwrap();
        assert_eq!(table.resolve("taj_mahal").map(|id| id.as_str()), Some("second"));
    }

    #[test]
    fn test_partial_first_match_wins() {
        let table = OverrideTable::new(vec![
            entry("gateway", "gateway-of-india"),
            entry("india_gate", "india-gate"),
        ])
        .unwrap();

        // both keys are contained in the hint; table order decides
        assert_eq!(
            table.resolve("gateway_india_gate_trip.jpg").map(|id| id.as_str()),
            Some("gateway-of-india")
        );
    }

    #[test]
    fn test_partial_key_contains_hint() {
        let table = OverrideTable::builtin().unwrap();
        // "hoysales" is contained in the alias "hoysaleswara"
        assert_eq!(
            table.resolve("hoysales").map(|id| id.as_str()),
            Some("halebidu-hoysaleswara-temple")
        );
    }

    #[test]
    fn test_partial_hint_contains_key() {
        let table = OverrideTable::builtin().unwrap();
        assert_eq!(
            table.resolve("IMG_2041_charminar_night.jpg").map(|id| id.as_str()),
            Some("charminar")
        );
    }

    #[test]
    fn test_no_match() {
        let table = OverrideTable::builtin().unwrap();
        assert!(table.resolve("IMG_0001.jpg").is_none());
        assert!(table.resolve("").is_none());
        assert!(table.resolve(".png").is_none());
    }

    #[test]
    fn test_empty_canonical_hint_is_absent() {
        let table = OverrideTable::builtin().unwrap();
        for hint in ["", ".jpg", "-", "  __  ", "_.webp"] {
            assert_eq!(canonicalize_hint(hint), "", "{hint:?}");
            assert!(table.resolve(hint).is_none(), "{hint:?}");
        }
    }

    #[test]
    fn test_non_canonical_alias_rejected() {
        let result = OverrideTable::new(vec![entry("Taj Mahal", "taj-mahal")]);
        assert!(matches!(result, Err(Error::CatalogLoad(_))));
    }

    #[test]
    fn test_entries_keep_table_order() {
        let table = OverrideTable::builtin().unwrap();
        let first: Vec<_> = table.entries().iter().take(3).map(|e| e.alias.as_str()).collect();
        assert_eq!(first, vec!["taj_mahal", "tajmahal", "taj"]);
        assert_eq!(table.len(), 102);
    }
}
