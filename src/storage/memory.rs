//! In-memory record store
//!
//! Enforces the same constraints as the database schema (unique business
//! slug, existing foreign keys) and applies bulk inserts all-or-nothing.
//! Every call is recorded so tests can assert on the exact interaction.

use super::store::{RecordStore, StoreError};
use crate::core::import::types::{
    CandidateRecord, CollectionKind, ReferenceEntity, ReferenceKind,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// One interaction with the store, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchAll(ReferenceKind),
    /// Row numbers of the payload
    BulkInsert(CollectionKind, Vec<usize>),
    InsertOne(CollectionKind, usize),
}

/// A business as stored
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBusiness {
    pub id: Uuid,
    pub record: CandidateRecord,
}

#[derive(Debug, Default)]
struct MemoryState {
    categories: Vec<ReferenceEntity>,
    neighbourhoods: Vec<ReferenceEntity>,
    businesses: Vec<StoredBusiness>,
    failing_fetches: HashSet<ReferenceKind>,
    echo_counts: bool,
    calls: Vec<StoreCall>,
}

/// Constraint-enforcing in-process [`RecordStore`]
#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                echo_counts: true,
                ..MemoryState::default()
            }),
        }
    }

    /// Copy the reference data of another store, e.g. a database for a dry run
    pub async fn with_references_from(source: &dyn RecordStore) -> Result<Self, StoreError> {
        let store = Self::new();
        for kind in ReferenceKind::ALL {
            let entities = source.fetch_all(kind).await?;
            let mut state = store.state.lock();
            match kind {
                ReferenceKind::Category => state.categories = entities,
                ReferenceKind::Neighbourhood => state.neighbourhoods = entities,
            }
        }
        Ok(store)
    }

    /// Add a reference entity and return its id
    pub fn add_reference(&self, kind: ReferenceKind, slug: &str, name: &str) -> Uuid {
        let entity = ReferenceEntity::new(slug, name);
        let id = entity.id;
        let mut state = self.state.lock();
        match kind {
            ReferenceKind::Category => state.categories.push(entity),
            ReferenceKind::Neighbourhood => state.neighbourhoods.push(entity),
        }
        id
    }

    /// Pre-existing business, e.g. one imported by an earlier run
    pub fn add_business(&self, name: &str, slug: &str) {
        let record = CandidateRecord {
            row: 0,
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            address: None,
            phone: None,
            email: None,
            website: None,
            latitude: None,
            longitude: None,
            category_id: None,
            neighbourhood_id: None,
            status: "active".to_string(),
        };
        self.state.lock().businesses.push(StoredBusiness {
            id: Uuid::new_v4(),
            record,
        });
    }

    /// Make every `fetch_all(kind)` fail as if the backend were down
    pub fn fail_fetch(&self, kind: ReferenceKind) {
        self.state.lock().failing_fetches.insert(kind);
    }

    /// Whether `bulk_insert` reports how many rows it inserted
    pub fn set_echo_counts(&self, echo: bool) {
        self.state.lock().echo_counts = echo;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().calls.clone()
    }

    pub fn businesses(&self) -> Vec<StoredBusiness> {
        self.state.lock().businesses.clone()
    }

    pub fn business_count(&self) -> usize {
        self.state.lock().businesses.len()
    }

    /// Number of insert calls of either kind
    pub fn insert_call_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| !matches!(call, StoreCall::FetchAll(_)))
            .count()
    }
}

impl MemoryState {
    fn check(&self, record: &CandidateRecord, pending: &HashSet<&str>) -> Result<(), StoreError> {
        let slug_taken = pending.contains(record.slug.as_str())
            || self.businesses.iter().any(|b| b.record.slug == record.slug);
        if slug_taken {
            return Err(StoreError::unique_violation(format!(
                "duplicate key value violates unique constraint \"businesses_slug_key\": slug '{}' already exists",
                record.slug
            )));
        }

        if let Some(id) = record.category_id {
            if !self.categories.iter().any(|c| c.id == id) {
                return Err(StoreError::foreign_key_violation(format!(
                    "category_id {} does not reference an existing category",
                    id
                )));
            }
        }

        if let Some(id) = record.neighbourhood_id {
            if !self.neighbourhoods.iter().any(|n| n.id == id) {
                return Err(StoreError::foreign_key_violation(format!(
                    "neighbourhood_id {} does not reference an existing neighbourhood",
                    id
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn fetch_all(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::FetchAll(kind));

        if state.failing_fetches.contains(&kind) {
            return Err(StoreError::unavailable(format!("{} table is unreachable", kind)));
        }

        Ok(match kind {
            ReferenceKind::Category => state.categories.clone(),
            ReferenceKind::Neighbourhood => state.neighbourhoods.clone(),
        })
    }

    async fn bulk_insert(
        &self,
        collection: CollectionKind,
        records: &[CandidateRecord],
    ) -> Result<Option<usize>, StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::BulkInsert(
            collection,
            records.iter().map(|r| r.row).collect(),
        ));

        let mut pending = HashSet::new();
        for record in records {
            state.check(record, &pending)?;
            pending.insert(record.slug.as_str());
        }

        state
            .businesses
            .extend(records.iter().cloned().map(|record| StoredBusiness {
                id: Uuid::new_v4(),
                record,
            }));
        debug!(count = records.len(), "Bulk inserted businesses in memory");

        Ok(state.echo_counts.then_some(records.len()))
    }

    async fn insert_one(
        &self,
        collection: CollectionKind,
        record: &CandidateRecord,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.calls.push(StoreCall::InsertOne(collection, record.row));

        state.check(record, &HashSet::new())?;
        state.businesses.push(StoredBusiness {
            id: Uuid::new_v4(),
            record: record.clone(),
        });
        Ok(())
    }
}
