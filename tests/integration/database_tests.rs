//! Database integration tests
//!
//! Full import jobs against a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::database::test_db_config;
    use crate::common::{BusinessRowFactory, TestDatabase, table_of};
    use directory_import::config::ImportSettings;
    use directory_import::core::import::{
        CandidateRecord, CollectionKind, Confirmation, ImportController, ImportOutcome,
        ImportPhase, ImportSummary, RawRow, ReferenceKind,
    };
    use directory_import::{Database, InMemoryStore, RecordStore};
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    fn controller(db: &TestDatabase) -> ImportController {
        ImportController::new(
            db.db_arc(),
            ImportSettings::default().with_batch_delay(Duration::ZERO),
        )
    }

    fn summary_of(outcome: ImportOutcome) -> ImportSummary {
        match outcome {
            ImportOutcome::Finished(summary) => summary,
            other => panic!("expected a finished import, got {:?}", other),
        }
    }

    fn candidate(slug: &str) -> CandidateRecord {
        CandidateRecord {
            row: 2,
            name: slug.to_string(),
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
            status: "pending".to_string(),
        }
    }

    #[tokio::test]
    async fn test_reference_fetch_returns_seeded_rows() {
        let (db, ids) = TestDatabase::seeded().await;

        let categories = db.db().fetch_all(ReferenceKind::Category).await.unwrap();
        let mut slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        slugs.sort();
        assert_eq!(slugs, vec!["bookshop", "cafe"]);

        let neighbourhoods = db.db().fetch_all(ReferenceKind::Neighbourhood).await.unwrap();
        assert_eq!(neighbourhoods.len(), 1);
        assert_eq!(neighbourhoods[0].id, ids.old_town);
    }

    #[tokio::test]
    async fn test_import_resolves_and_stores_every_field() {
        let (db, ids) = TestDatabase::seeded().await;
        let controller = controller(&db);

        let table = table_of(vec![
            BusinessRowFactory::complete("Blue Door Cafe", "cafe", "old-town"),
            BusinessRowFactory::complete("Corner Books", "Bookshop", "Old Town"),
            BusinessRowFactory::complete("Mystery Shop", "unknown-xyz", "nowhere"),
        ]);

        let summary = summary_of(
            controller
                .run(table, Confirmation::NotConfirmed)
                .await
                .unwrap(),
        );
        assert_eq!(summary.phase, ImportPhase::Completed);
        assert_eq!(summary.success, 3);

        let blue_door = db
            .db()
            .find_business_by_slug("blue-door-cafe")
            .await
            .unwrap()
            .expect("business stored");
        assert_eq!(blue_door.category_id, Some(ids.cafe));
        assert_eq!(blue_door.neighbourhood_id, Some(ids.old_town));
        assert_eq!(blue_door.website.as_deref(), Some("https://example.com"));
        assert_eq!(blue_door.latitude, Some(51.5072));
        assert_eq!(blue_door.status, "active");

        let corner = db
            .db()
            .find_business_by_slug("corner-books")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(corner.category_id, Some(ids.bookshop));

        let mystery = db
            .db()
            .find_business_by_slug("mystery-shop")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mystery.category_id, None);
        assert_eq!(mystery.neighbourhood_id, None);
    }

    #[tokio::test]
    async fn test_duplicate_slug_costs_one_row_not_the_batch() {
        let (db, _ids) = TestDatabase::seeded().await;
        let controller = controller(&db);

        let existing = table_of(vec![RawRow::from_pairs([("name", "Business 17")])]);
        controller
            .run(existing, Confirmation::NotConfirmed)
            .await
            .unwrap();
        controller.take_summary();
        controller.reset().unwrap();

        let summary = summary_of(
            controller
                .run(BusinessRowFactory::named(50), Confirmation::NotConfirmed)
                .await
                .unwrap(),
        );

        assert_eq!(summary.phase, ImportPhase::CompletedWithErrors);
        assert_eq!(summary.success, 49);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors[0].row, 19);
        assert!(summary.errors[0].error.to_lowercase().contains("unique"));
        assert_eq!(db.db().count_businesses().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_failed_bulk_insert_leaves_no_rows() {
        let db = TestDatabase::new().await;
        db.db()
            .insert_one(CollectionKind::Businesses, &candidate("taken"))
            .await
            .unwrap();

        let result = db
            .db()
            .bulk_insert(
                CollectionKind::Businesses,
                &[candidate("fresh"), candidate("taken"), candidate("also-fresh")],
            )
            .await;

        assert!(result.is_err());
        assert_eq!(db.db().count_businesses().await.unwrap(), 1);
        assert!(db.db().find_business_by_slug("fresh").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bulk_insert_reports_count() {
        let db = TestDatabase::new().await;
        let inserted = db
            .db()
            .bulk_insert(
                CollectionKind::Businesses,
                &[candidate("a"), candidate("b")],
            )
            .await
            .unwrap();
        assert_eq!(inserted, Some(2));
    }

    #[tokio::test]
    async fn test_unknown_foreign_key_rejected() {
        let db = TestDatabase::new().await;
        let mut orphan = candidate("orphan");
        orphan.category_id = Some(Uuid::new_v4());

        let result = db
            .db()
            .insert_one(CollectionKind::Businesses, &orphan)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_against_database_references() {
        let (db, ids) = TestDatabase::seeded().await;
        let dry = Arc::new(InMemoryStore::with_references_from(db.db()).await.unwrap());
        let controller = ImportController::new(
            dry.clone(),
            ImportSettings::default().with_batch_delay(Duration::ZERO),
        );

        let table = table_of(vec![BusinessRowFactory::complete(
            "Blue Door Cafe",
            "cafe",
            "old-town",
        )]);
        controller
            .run(table, Confirmation::NotConfirmed)
            .await
            .unwrap();

        assert_eq!(db.db().count_businesses().await.unwrap(), 0);
        assert_eq!(dry.businesses()[0].record.category_id, Some(ids.cafe));
    }

    #[tokio::test]
    async fn test_plain_connect_runs_no_migrations() {
        let db = Database::new(&test_db_config()).await.unwrap();

        assert!(db.fetch_all(ReferenceKind::Category).await.is_err());
        assert!(db.count_businesses().await.is_err());
    }
}
