use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const BUILTIN_MONUMENTS: &str = include_str!("../data/monuments.json");

/// Stable identifier of a monument (`"taj-mahal"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonumentId(String);

impl MonumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MonumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MonumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for MonumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Display content for a monument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonumentRecord {
    pub id: MonumentId,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MonumentRecord {
    pub fn new(id: impl Into<MonumentId>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Read-only monument content catalog, kept in authored order
#[derive(Debug, Clone)]
pub struct MonumentCatalog {
    records: Vec<MonumentRecord>,
    index: AHashMap<MonumentId, usize>,
}

impl MonumentCatalog {
    pub fn new(records: Vec<MonumentRecord>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(Error::CatalogLoad(format!(
                    "monument '{}' has an empty name",
                    record.id
                )));
            }
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(Error::DuplicateId(record.id.to_string()));
            }
        }
        Ok(Self { records, index })
    }

    /// Monument records compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_MONUMENTS)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<MonumentRecord> =
            serde_json::from_str(json).map_err(|e| Error::CatalogLoad(e.to_string()))?;
        Self::new(records)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get_by_id(&self, id: &MonumentId) -> Option<&MonumentRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, id: &MonumentId) -> bool {
        self.index.contains_key(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &MonumentRecord> {
        self.records.iter()
    }

    /// Case-insensitive substring search over name and location
    pub fn search(&self, query: &str) -> Vec<&MonumentRecord> {
        let query = query.to_lowercase();
        self.records
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&query)
                    || m.location.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
