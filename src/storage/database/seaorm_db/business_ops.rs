use crate::core::import::types::CandidateRecord;
use crate::utils::error::Result;
use sea_orm::*;
use uuid::Uuid;

use super::super::entities;
use super::types::SeaOrmDatabase;

impl entities::business::ActiveModel {
    /// Fresh row for a built record
    pub(crate) fn from_candidate(record: &CandidateRecord) -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            name: Set(record.name.clone()),
            slug: Set(record.slug.clone()),
            description: Set(record.description.clone()),
            address: Set(record.address.clone()),
            phone: Set(record.phone.clone()),
            email: Set(record.email.clone()),
            website: Set(record.website.clone()),
            latitude: Set(record.latitude),
            longitude: Set(record.longitude),
            category_id: Set(record.category_id),
            neighbourhood_id: Set(record.neighbourhood_id),
            status: Set(record.status.clone()),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

impl SeaOrmDatabase {
    /// Find a business by slug
    pub async fn find_business_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<entities::business::Model>> {
        Ok(entities::Business::find()
            .filter(entities::business::Column::Slug.eq(slug))
            .one(&self.db)
            .await?)
    }

    /// All businesses, ordered by slug
    pub async fn list_businesses(&self) -> Result<Vec<entities::business::Model>> {
        Ok(entities::Business::find()
            .order_by_asc(entities::business::Column::Slug)
            .all(&self.db)
            .await?)
    }

    pub async fn count_businesses(&self) -> Result<u64> {
        Ok(entities::Business::find().count(&self.db).await?)
    }
}
