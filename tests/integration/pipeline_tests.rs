//! End-to-end import runs against the in-memory store

#[cfg(test)]
mod tests {
    use crate::common::{BusinessRowFactory, CsvBuilder};
    use directory_import::core::import::{
        Confirmation, ImportController, ImportOutcome, ImportPhase, ImportSummary, ReferenceKind,
    };
    use directory_import::{ImportError, InMemoryStore, RecordStore};
    use directory_import::config::ImportSettings;
    use std::sync::Arc;
    use std::time::Duration;

    fn fast_settings() -> ImportSettings {
        ImportSettings::default().with_batch_delay(Duration::ZERO)
    }

    fn summary_of(outcome: ImportOutcome) -> ImportSummary {
        match outcome {
            ImportOutcome::Finished(summary) => summary,
            other => panic!("expected a finished import, got {:?}", other),
        }
    }

    /// Spreadsheet exports with BOM, odd header case and quoted commas
    #[tokio::test]
    async fn test_spreadsheet_export_imports() {
        let store = Arc::new(InMemoryStore::new());
        let cafe = store.add_reference(ReferenceKind::Category, "cafe", "Cafe");
        let old_town = store.add_reference(ReferenceKind::Neighbourhood, "old-town", "Old Town");
        let controller = ImportController::new(store.clone(), fast_settings());

        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend(
            CsvBuilder::new(&["Name", "Category", "Neighbourhood", "Address", "Website"])
                .row(&["Blue Door Cafe", "cafe", "Old Town", "1 High St, Old Town", "bluedoor.example"])
                .row(&["Corner Books", "", "", "", ""])
                .build(),
        );

        let summary = summary_of(
            crate::assert_ok!(controller.run_bytes(&bytes, Confirmation::NotConfirmed).await),
        );
        assert_eq!(summary.phase, ImportPhase::Completed);
        assert_eq!(summary.success, 2);

        let stored = store.businesses();
        let blue_door = &stored[0].record;
        assert_eq!(blue_door.slug, "blue-door-cafe");
        assert_eq!(blue_door.category_id, Some(cafe));
        assert_eq!(blue_door.neighbourhood_id, Some(old_town));
        assert_eq!(blue_door.address.as_deref(), Some("1 High St, Old Town"));
        assert_eq!(blue_door.website.as_deref(), Some("https://bluedoor.example"));
        assert_eq!(blue_door.status, "pending");

        let corner = &stored[1].record;
        assert_eq!(corner.category_id, None);
        assert_eq!(corner.address, None);
    }

    #[tokio::test]
    async fn test_row_errors_do_not_stop_the_job() {
        let store = Arc::new(InMemoryStore::new());
        let controller = ImportController::new(store.clone(), fast_settings().with_batch_size(3));

        let bytes = CsvBuilder::new(&["name", "slug", "email", "latitude", "status"])
            .row(&["Alpha", "", "", "", ""])
            .row(&["Beta", "", "not-an-email", "", ""])
            .row(&["Gamma", "alpha", "", "", ""])
            .row(&["Delta", "", "", "91", ""])
            .row(&["Epsilon", "", "", "", "archived"])
            .row(&["Zeta", "", "", "12.5", "active"])
            .build();

        let summary = summary_of(
            controller
                .run_bytes(&bytes, Confirmation::NotConfirmed)
                .await
                .unwrap(),
        );

        assert_eq!(summary.phase, ImportPhase::CompletedWithErrors);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.processed, 6);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.failed, 4);
        let rows: Vec<usize> = summary.errors.iter().map(|e| e.row).collect();
        assert_eq!(rows, vec![3, 4, 5, 6]);
        assert_eq!(store.business_count(), 2);
    }

    #[tokio::test]
    async fn test_declined_confirmation_writes_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let controller = ImportController::new(store.clone(), fast_settings());

        let outcome = controller
            .run(BusinessRowFactory::named(120), Confirmation::NotConfirmed)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            ImportOutcome::ConfirmationRequired { total: 120, threshold: 100 }
        ));
        assert_eq!(controller.snapshot().total, 0);
        assert_eq!(controller.snapshot().phase, ImportPhase::Idle);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let store = Arc::new(InMemoryStore::new());
        let controller = ImportController::new(store.clone(), fast_settings());

        let summary = summary_of(
            controller
                .run(BusinessRowFactory::named(100), Confirmation::NotConfirmed)
                .await
                .unwrap(),
        );
        assert_eq!(summary.success, 100);
    }

    #[tokio::test]
    async fn test_failed_neighbourhood_fetch_aborts() {
        let store = Arc::new(InMemoryStore::new());
        store.fail_fetch(ReferenceKind::Neighbourhood);
        let controller = ImportController::new(store.clone(), fast_settings());

        let err = crate::assert_err!(
            controller
                .run(BusinessRowFactory::named(3), Confirmation::NotConfirmed)
                .await
        );

        assert!(matches!(
            err,
            ImportError::ReferenceFetch {
                kind: ReferenceKind::Neighbourhood,
                ..
            }
        ));
        assert_eq!(store.business_count(), 0);
        let summary = controller.take_summary().unwrap();
        assert_eq!(summary.phase, ImportPhase::Aborted);
        assert!(summary.abort_reason.unwrap().contains("neighbourhood"));
    }

    #[tokio::test]
    async fn test_dry_run_copy_leaves_source_untouched() {
        let source = Arc::new(InMemoryStore::new());
        let cafe = source.add_reference(ReferenceKind::Category, "cafe", "Cafe");

        let dry = Arc::new(InMemoryStore::with_references_from(source.as_ref()).await.unwrap());
        let controller = ImportController::new(dry.clone(), fast_settings());

        let bytes = CsvBuilder::new(&["name", "category_slug"])
            .row(&["Blue Door", "cafe"])
            .build();
        controller
            .run_bytes(&bytes, Confirmation::NotConfirmed)
            .await
            .unwrap();

        assert_eq!(source.business_count(), 0);
        assert_eq!(dry.business_count(), 1);
        assert_eq!(dry.businesses()[0].record.category_id, Some(cafe));

        let categories = dry.fetch_all(ReferenceKind::Category).await.unwrap();
        assert_eq!(categories.len(), 1);
    }

    #[tokio::test]
    async fn test_controller_is_reusable_after_acknowledgement() {
        let store = Arc::new(InMemoryStore::new());
        let controller = Arc::new(ImportController::new(store.clone(), fast_settings()));

        let handle = controller
            .clone()
            .spawn(BusinessRowFactory::named(4), Confirmation::NotConfirmed)
            .unwrap();
        handle.wait().await.unwrap();

        assert!(controller.reset().is_err());
        assert!(controller.take_summary().is_some());
        controller.reset().unwrap();

        let bytes = CsvBuilder::new(&["name"]).row(&["Fresh Start"]).build();
        let summary = summary_of(
            controller
                .run_bytes(&bytes, Confirmation::NotConfirmed)
                .await
                .unwrap(),
        );
        assert_eq!(summary.total, 1);
        assert_eq!(summary.success, 1);
        assert_eq!(store.business_count(), 5);
    }
}
