//! Immutable record catalog, loaded once and borrowed by every tree.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::record::{Record, RecordId};

const BUILTIN_CATALOG: &str = include_str!("../../data/pokedex.toml");

/// Starter ids offered when opening a new pokedex.
pub const DEFAULT_STARTERS: [RecordId; 3] = [1, 4, 7];

#[derive(Debug, Deserialize)]
struct CatalogFile {
    pokemon: Vec<Record>,
}

/// Read-only lookup table of records.
///
/// Position `i` holds the record with id `i + 1`, so lookups are index based.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Record>,
    starters: Vec<RecordId>,
}

impl Catalog {
    /// The embedded first-generation table.
    pub fn builtin() -> DomainResult<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    #[instrument(level = "debug", skip(text))]
    pub fn from_toml_str(text: &str) -> DomainResult<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::from_records(file.pokemon)
    }

    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> DomainResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DomainError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build a catalog after checking that ids run 1, 2, 3, ... without gaps.
    pub fn from_records(records: Vec<Record>) -> DomainResult<Self> {
        if records.is_empty() {
            return Err(DomainError::InvalidCatalog {
                message: "catalog has no records".to_string(),
            });
        }
        for (position, record) in records.iter().enumerate() {
            let expected = position as RecordId + 1;
            if record.id != expected {
                return Err(DomainError::InvalidCatalog {
                    message: format!(
                        "record '{}' has id {}, expected {}",
                        record.name, record.id, expected
                    ),
                });
            }
        }
        debug!("Catalog loaded with {} records", records.len());
        let starters = DEFAULT_STARTERS
            .iter()
            .copied()
            .filter(|id| (*id as usize) <= records.len())
            .collect();
        Ok(Self { records, starters })
    }

    /// Replace the starter list; every id must exist in the catalog.
    pub fn with_starters(mut self, starters: &[RecordId]) -> DomainResult<Self> {
        if let Some(missing) = starters.iter().find(|id| !self.contains(**id)) {
            return Err(DomainError::UnknownRecord(*missing));
        }
        self.starters = starters.to_vec();
        Ok(self)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        let index = (id as usize).checked_sub(1)?;
        self.records.get(index)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_id(&self) -> RecordId {
        self.records.len() as RecordId
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// The record `record` evolves into, if it can evolve.
    pub fn evolution_of(&self, record: &Record) -> Option<&Record> {
        if record.can_evolve {
            self.get(record.id + 1)
        } else {
            None
        }
    }

    pub fn starters(&self) -> impl Iterator<Item = &Record> {
        self.starters.iter().filter_map(|id| self.get(*id))
    }

    /// Starter for a 1-based menu choice.
    pub fn starter(&self, choice: usize) -> Option<&Record> {
        let index = choice.checked_sub(1)?;
        self.starters.get(index).and_then(|id| self.get(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_contiguous() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 151);
        assert_eq!(catalog.get(25).unwrap().name, "Pikachu");
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(152).is_none());
    }
}
