//! Reference resolution: external slug or name to internal id
//!
//! Reference data is fetched once per job (one call per kind, never per
//! row) and then treated as an immutable snapshot for the job's lifetime.

use super::types::{ReferenceEntity, ReferenceKind};
use crate::storage::RecordStore;
use crate::utils::error::{ImportError, Result};
use std::collections::HashMap;
use tracing::{debug, error};
use uuid::Uuid;

/// Slug and lowercase-name lookups for one reference kind
#[derive(Debug, Clone, Default)]
pub struct SlugNameIndex {
    by_slug: HashMap<String, Uuid>,
    by_name: HashMap<String, Uuid>,
}

impl SlugNameIndex {
    /// Index `entities`; when two share a slug or name, the first one wins
    pub fn from_entities(entities: &[ReferenceEntity]) -> Self {
        let mut index = Self::default();
        for entity in entities {
            index.by_slug.entry(entity.slug.clone()).or_insert(entity.id);
            index
                .by_name
                .entry(entity.name.trim().to_lowercase())
                .or_insert(entity.id);
        }
        index
    }

    /// Exact slug match first, then case-insensitive name match.
    ///
    /// `None` means "not found", which callers treat as a legal, unplaced
    /// row rather than an error.
    pub fn resolve(&self, text: &str) -> Option<Uuid> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.by_slug
            .get(text)
            .or_else(|| self.by_name.get(&text.to_lowercase()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }
}

/// Lookups for every reference kind, built once per job
#[derive(Debug, Clone, Default)]
pub struct ReferenceLookup {
    categories: SlugNameIndex,
    neighbourhoods: SlugNameIndex,
}

impl ReferenceLookup {
    pub fn new(categories: &[ReferenceEntity], neighbourhoods: &[ReferenceEntity]) -> Self {
        Self {
            categories: SlugNameIndex::from_entities(categories),
            neighbourhoods: SlugNameIndex::from_entities(neighbourhoods),
        }
    }

    /// Fetch every category and every neighbourhood, one call each.
    ///
    /// Either fetch failing fails the job: reference data is a prerequisite.
    pub async fn load(store: &dyn RecordStore) -> Result<Self> {
        let categories = fetch_kind(store, ReferenceKind::Category).await?;
        let neighbourhoods = fetch_kind(store, ReferenceKind::Neighbourhood).await?;

        debug!(
            categories = categories.len(),
            neighbourhoods = neighbourhoods.len(),
            "Reference lookups built"
        );
        Ok(Self::new(&categories, &neighbourhoods))
    }

    pub fn index(&self, kind: ReferenceKind) -> &SlugNameIndex {
        match kind {
            ReferenceKind::Category => &self.categories,
            ReferenceKind::Neighbourhood => &self.neighbourhoods,
        }
    }

    pub fn resolve(&self, kind: ReferenceKind, text: &str) -> Option<Uuid> {
        self.index(kind).resolve(text)
    }
}

async fn fetch_kind(store: &dyn RecordStore, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>> {
    store.fetch_all(kind).await.map_err(|source| {
        error!("Failed to fetch {} reference data: {}", kind, source);
        ImportError::ReferenceFetch { kind, source }
    })
}
