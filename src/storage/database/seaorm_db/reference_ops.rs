use crate::core::import::types::{ReferenceEntity, ReferenceKind};
use crate::utils::error::Result;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::*;
use tracing::debug;

use super::super::entities;
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Create a category or neighbourhood
    pub async fn create_reference(
        &self,
        kind: ReferenceKind,
        slug: &str,
        name: &str,
    ) -> Result<ReferenceEntity> {
        debug!("Creating {}: {}", kind, slug);

        let entity = ReferenceEntity::new(slug, name);
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        match kind {
            ReferenceKind::Category => {
                entities::category::ActiveModel {
                    id: Set(entity.id),
                    slug: Set(entity.slug.clone()),
                    name: Set(entity.name.clone()),
                    created_at: Set(now),
                }
                .insert(&self.db)
                .await?;
            }
            ReferenceKind::Neighbourhood => {
                entities::neighbourhood::ActiveModel {
                    id: Set(entity.id),
                    slug: Set(entity.slug.clone()),
                    name: Set(entity.name.clone()),
                    created_at: Set(now),
                }
                .insert(&self.db)
                .await?;
            }
        }

        Ok(entity)
    }

    /// All references of `kind`, oldest first
    pub(super) async fn list_references(
        &self,
        kind: ReferenceKind,
    ) -> std::result::Result<Vec<ReferenceEntity>, DbErr> {
        let references: Vec<ReferenceEntity> = match kind {
            ReferenceKind::Category => entities::Category::find()
                .order_by_asc(entities::category::Column::CreatedAt)
                .order_by_asc(entities::category::Column::Slug)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| ReferenceEntity {
                    id: m.id,
                    slug: m.slug,
                    name: m.name,
                })
                .collect(),
            ReferenceKind::Neighbourhood => entities::Neighbourhood::find()
                .order_by_asc(entities::neighbourhood::Column::CreatedAt)
                .order_by_asc(entities::neighbourhood::Column::Slug)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| ReferenceEntity {
                    id: m.id,
                    slug: m.slug,
                    name: m.name,
                })
                .collect(),
        };

        debug!(kind = %kind, count = references.len(), "Loaded reference data");
        Ok(references)
    }
}
