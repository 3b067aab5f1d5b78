use crate::core::import::types::{
    CandidateRecord, CollectionKind, ReferenceEntity, ReferenceKind,
};
use crate::storage::{RecordStore, StoreError};
use async_trait::async_trait;
use sea_orm::{EntityTrait, TransactionTrait};
use tracing::debug;

use super::super::entities;
use super::types::SeaOrmDatabase;

#[async_trait]
impl RecordStore for SeaOrmDatabase {
    async fn fetch_all(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, StoreError> {
        Ok(self.list_references(kind).await?)
    }

    async fn bulk_insert(
        &self,
        collection: CollectionKind,
        records: &[CandidateRecord],
    ) -> Result<Option<usize>, StoreError> {
        if records.is_empty() {
            return Ok(Some(0));
        }

        match collection {
            CollectionKind::Businesses => {
                let models = records
                    .iter()
                    .map(entities::business::ActiveModel::from_candidate);

                let txn = self.db.begin().await?;
                match entities::Business::insert_many(models)
                    .exec_without_returning(&txn)
                    .await
                {
                    Ok(inserted) => {
                        txn.commit().await?;
                        debug!(count = inserted, "Bulk inserted businesses");
                        Ok(usize::try_from(inserted).ok())
                    }
                    Err(err) => {
                        txn.rollback().await?;
                        Err(err.into())
                    }
                }
            }
        }
    }

    async fn insert_one(
        &self,
        collection: CollectionKind,
        record: &CandidateRecord,
    ) -> Result<(), StoreError> {
        match collection {
            CollectionKind::Businesses => {
                entities::Business::insert(entities::business::ActiveModel::from_candidate(
                    record,
                ))
                .exec_without_returning(&self.db)
                .await?;
                Ok(())
            }
        }
    }
}
