//! Error report tests

#[cfg(test)]
mod tests {
    use crate::common::CsvBuilder;
    use directory_import::config::ImportSettings;
    use directory_import::core::import::{
        Confirmation, ImportController, ImportOutcome, write_error_report,
    };
    use directory_import::InMemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_report_can_be_fixed_and_reimported() {
        let store = Arc::new(InMemoryStore::new());
        let controller = ImportController::new(
            store.clone(),
            ImportSettings::default().with_batch_delay(Duration::ZERO),
        );

        let bytes = CsvBuilder::new(&["name", "latitude", "phone"])
            .row(&["Alpha", "45.0", "555-0100"])
            .row(&["Beta", "north", "555-0101"])
            .build();

        let summary = match controller
            .run_bytes(&bytes, Confirmation::NotConfirmed)
            .await
            .unwrap()
        {
            ImportOutcome::Finished(summary) => summary,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(summary.failed, 1);

        let file = tempfile::NamedTempFile::new().unwrap();
        write_error_report(&summary.errors, file.reopen().unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(file.path()).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["row", "error", "name", "latitude", "phone"]
        );

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "3");
        assert!(records[0][1].contains("latitude 'north' is not a number"));
        assert_eq!(&records[0][2], "Beta");
        assert_eq!(&records[0][4], "555-0101");
    }
}
