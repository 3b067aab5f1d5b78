//! Batch execution: build, bulk insert, per-record fallback, publish, pause

use super::builder::build_record;
use super::progress::ProgressPublisher;
use super::resolver::ReferenceLookup;
use super::types::{CandidateRecord, CollectionKind, RawRow, RowError, row_number};
use crate::config::ImportSettings;
use crate::storage::{RecordStore, StoreError};
use tracing::{debug, info, warn};

/// A record the store refused, with the store's reason
#[derive(Debug, Clone, PartialEq)]
pub struct InsertFailure {
    pub row: usize,
    pub error: StoreError,
}

/// What happened to one batch payload
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    pub inserted: usize,
    pub failures: Vec<InsertFailure>,
    /// Whether the per-record path was taken
    pub fell_back: bool,
}

impl BatchOutcome {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Insert `payload` in one bulk call, falling back to one call per record
/// when the bulk call fails or reports fewer records than it was given.
///
/// The fallback is sequential and keeps payload order, so each failure is
/// attributed to exactly one row.
pub async fn insert_with_fallback(
    store: &dyn RecordStore,
    collection: CollectionKind,
    payload: &[CandidateRecord],
) -> BatchOutcome {
    if payload.is_empty() {
        return BatchOutcome::default();
    }

    let bulk_error = match store.bulk_insert(collection, payload).await {
        Ok(Some(reported)) if reported < payload.len() => {
            format!("only {} of {} records reported inserted", reported, payload.len())
        }
        Ok(_) => {
            return BatchOutcome {
                inserted: payload.len(),
                ..BatchOutcome::default()
            };
        }
        Err(e) => e.to_string(),
    };

    warn!(
        first_row = payload[0].row,
        size = payload.len(),
        "Bulk insert failed ({}), retrying record by record",
        bulk_error
    );

    let mut outcome = BatchOutcome {
        fell_back: true,
        ..BatchOutcome::default()
    };

    for record in payload {
        match store.insert_one(collection, record).await {
            Ok(()) => outcome.inserted += 1,
            Err(error) => {
                warn!(row = record.row, "Row rejected by storage: {}", error);
                outcome.failures.push(InsertFailure {
                    row: record.row,
                    error,
                });
            }
        }
    }

    outcome
}

/// Drives every row of a job through consecutive batches
pub struct BatchExecutor<'a> {
    store: &'a dyn RecordStore,
    lookup: &'a ReferenceLookup,
    settings: &'a ImportSettings,
    publisher: &'a ProgressPublisher,
}

impl<'a> BatchExecutor<'a> {
    pub fn new(
        store: &'a dyn RecordStore,
        lookup: &'a ReferenceLookup,
        settings: &'a ImportSettings,
        publisher: &'a ProgressPublisher,
    ) -> Self {
        Self {
            store,
            lookup,
            settings,
            publisher,
        }
    }

    /// Process `rows` batch by batch; counters accumulate on the published snapshot
    pub async fn run(&self, rows: &[RawRow]) {
        let total = rows.len();
        let batch_size = self.settings.batch_size.max(1);
        let batch_count = total.div_ceil(batch_size);

        for (batch_index, batch) in rows.chunks(batch_size).enumerate() {
            let start = batch_index * batch_size;
            self.process_batch(rows, start, batch, total).await;

            if batch_index + 1 < batch_count {
                tokio::time::sleep(self.settings.batch_delay()).await;
            }
        }
    }

    async fn process_batch(&self, rows: &[RawRow], start: usize, batch: &[RawRow], total: usize) {
        let mut errors = Vec::new();
        let mut payload = Vec::with_capacity(batch.len());

        for (offset, raw) in batch.iter().enumerate() {
            match build_record(raw, self.lookup, row_number(start + offset)) {
                Ok(record) => payload.push(record),
                Err(row_error) => {
                    debug!(row = row_error.row, "Row failed to build: {}", row_error.error);
                    errors.push(row_error);
                }
            }
        }

        let built_failures = errors.len();
        let outcome = insert_with_fallback(self.store, CollectionKind::Businesses, &payload).await;

        for failure in &outcome.failures {
            errors.push(RowError::new(
                failure.row,
                failure.error.to_string(),
                original_row(rows, failure.row),
            ));
        }

        // Builder errors first, then storage errors, each in row order
        errors.sort_by_key(|e| e.row);

        let failed = built_failures + outcome.failed();
        let processed = total.min(start + batch.len());

        let snapshot = self.publisher.publish(|s| {
            s.processed = processed;
            s.success += outcome.inserted;
            s.failed += failed;
            if !errors.is_empty() {
                s.errors = s.errors.iter().cloned().chain(errors).collect();
            }
        });

        info!(
            processed = snapshot.processed,
            total,
            success = snapshot.success,
            failed = snapshot.failed,
            fell_back = outcome.fell_back,
            "Batch finished"
        );
    }
}

fn original_row(rows: &[RawRow], row: usize) -> RawRow {
    row.checked_sub(row_number(0))
        .and_then(|index| rows.get(index))
        .cloned()
        .unwrap_or_default()
}
