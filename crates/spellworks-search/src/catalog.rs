//! Spell catalog types and loading.
//!
//! The catalog is loaded once and never mutated afterwards; the search engine
//! only reads records. Categorical attributes are the raw game-table values, so
//! they are modelled as opaque newtypes that support equality and ordering but
//! carry no member definitions of their own.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// How a spell is cast (game-table value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CastMethod(pub u32);

/// Target mechanic type of a spell (game-table value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TargetMechanicType(pub u32);

/// Target mechanic flags of a spell, compared as a whole value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TargetMechanicFlags(pub u32);

/// Effect type of a spell (game-table value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EffectType(pub u32);

/// A single spell as seen by the search engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellRecord {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cast_method: CastMethod,
    pub target_mechanic_type: TargetMechanicType,
    pub target_mechanic_flags: TargetMechanicFlags,
    pub effect_type: EffectType,
}

impl SpellRecord {
    /// Create a record with the given id and description and zeroed attributes.
    pub fn new(id: u32, description: Option<&str>) -> Self {
        Self {
            id,
            description: description.map(str::to_string),
            cast_method: CastMethod(0),
            target_mechanic_type: TargetMechanicType(0),
            target_mechanic_flags: TargetMechanicFlags(0),
            effect_type: EffectType(0),
        }
    }

    pub fn with_cast_method(mut self, value: CastMethod) -> Self {
        self.cast_method = value;
        self
    }

    pub fn with_target_mechanic_type(mut self, value: TargetMechanicType) -> Self {
        self.target_mechanic_type = value;
        self
    }

    pub fn with_target_mechanic_flags(mut self, value: TargetMechanicFlags) -> Self {
        self.target_mechanic_flags = value;
        self
    }

    pub fn with_effect_type(mut self, value: EffectType) -> Self {
        self.effect_type = value;
        self
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate spell id {0} in catalog")]
    DuplicateId(u32),
}

/// Distinct attribute values present in a catalog, sorted, for populating
/// selection lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeOptions {
    pub cast_methods: Vec<CastMethod>,
    pub target_mechanic_types: Vec<TargetMechanicType>,
    pub target_mechanic_flags: Vec<TargetMechanicFlags>,
    pub effect_types: Vec<EffectType>,
}

/// Ordered, read-only collection of spell records keyed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<Arc<SpellRecord>>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// Build a catalog from records, keeping their order.
    ///
    /// Identifiers must be unique.
    pub fn from_records(records: Vec<SpellRecord>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id, index).is_some() {
                return Err(CatalogError::DuplicateId(record.id));
            }
        }

        Ok(Self {
            records: records.into_iter().map(Arc::new).collect(),
            by_id,
        })
    }

    /// Parse a catalog from a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<SpellRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Load a catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&contents)?;
        info!(
            "Loaded {} spell records from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn records(&self) -> &[Arc<SpellRecord>] {
        &self.records
    }

    pub fn get(&self, id: u32) -> Option<&Arc<SpellRecord>> {
        self.by_id.get(&id).map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Collect the distinct values of every categorical attribute.
    pub fn attribute_options(&self) -> AttributeOptions {
        fn distinct<T: Ord + Copy>(
            records: &[Arc<SpellRecord>],
            field: impl Fn(&SpellRecord) -> T,
        ) -> Vec<T> {
            records
                .iter()
                .map(|r| field(r.as_ref()))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        }

        AttributeOptions {
            cast_methods: distinct(&self.records, |r| r.cast_method),
            target_mechanic_types: distinct(&self.records, |r| r.target_mechanic_type),
            target_mechanic_flags: distinct(&self.records, |r| r.target_mechanic_flags),
            effect_types: distinct(&self.records, |r| r.effect_type),
        }
    }
}
