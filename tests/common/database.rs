//! Test database utilities
//!
//! Each test gets an isolated in-memory SQLite database with the schema
//! migrated.

use directory_import::config::DatabaseConfig;
use directory_import::core::import::ReferenceKind;
use directory_import::storage::database::Database;
use std::sync::Arc;
use uuid::Uuid;

/// Ids of the reference rows created by [`TestDatabase::seeded`]
#[derive(Debug, Clone, Copy)]
pub struct SeedIds {
    pub cafe: Uuid,
    pub bookshop: Uuid,
    pub old_town: Uuid,
}

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new migrated in-memory database
    pub async fn new() -> Self {
        let db = Database::connect_and_migrate(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Create a database with two categories and one neighbourhood
    pub async fn seeded() -> (Self, SeedIds) {
        let db = Self::new().await;
        let ids = SeedIds {
            cafe: db.reference(ReferenceKind::Category, "cafe", "Cafe").await,
            bookshop: db
                .reference(ReferenceKind::Category, "bookshop", "Bookshop")
                .await,
            old_town: db
                .reference(ReferenceKind::Neighbourhood, "old-town", "Old Town")
                .await,
        };
        (db, ids)
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }

    async fn reference(&self, kind: ReferenceKind, slug: &str, name: &str) -> Uuid {
        self.inner
            .create_reference(kind, slug, name)
            .await
            .expect("Failed to seed reference data")
            .id
    }
}

/// In-memory SQLite; one connection, since each connection is its own database
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig::in_memory()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_seeded_database() {
        let (db, _ids) = TestDatabase::seeded().await;
        let stats = db.db().stats().await.unwrap();
        assert_eq!(stats.categories, 2);
        assert_eq!(stats.neighbourhoods, 1);
        assert_eq!(stats.businesses, 0);
    }
}
