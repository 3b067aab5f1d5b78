//! Import job controller: the job state machine around the pipeline stages

use super::executor::BatchExecutor;
use super::parser::parse_table;
use super::progress::{ProgressObserver, ProgressPublisher};
use super::resolver::ReferenceLookup;
use super::types::{ImportPhase, ImportSnapshot, ImportSummary, Table};
use super::validator::validate_table;
use crate::config::ImportSettings;
use crate::storage::RecordStore;
use crate::utils::error::{ImportError, Result};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Caller's answer to the pre-flight size check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    Confirmed,
    #[default]
    NotConfirmed,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::NotConfirmed
        }
    }
}

/// How a call to [`ImportController::run`] ended
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// The table is larger than the threshold; nothing was fetched or written
    ConfirmationRequired { total: usize, threshold: usize },
    /// The job reached `Completed` or `CompletedWithErrors`
    Finished(ImportSummary),
}

/// Releases the running flag when the job ends, however it ends
struct RunGuard {
    running: Arc<AtomicBool>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Runs import jobs against a [`RecordStore`], one at a time
pub struct ImportController {
    store: Arc<dyn RecordStore>,
    settings: ImportSettings,
    publisher: ProgressPublisher,
    running: Arc<AtomicBool>,
    acknowledged: AtomicBool,
}

impl ImportController {
    pub fn new(store: Arc<dyn RecordStore>, settings: ImportSettings) -> Self {
        Self {
            store,
            settings,
            publisher: ProgressPublisher::new(),
            running: Arc::new(AtomicBool::new(false)),
            acknowledged: AtomicBool::new(true),
        }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Run a whole job inline
    pub async fn run(&self, table: Table, confirmation: Confirmation) -> Result<ImportOutcome> {
        let guard = self.begin()?;
        self.execute(table, confirmation, guard).await
    }

    /// Parse `bytes` as CSV, then run the job
    pub async fn run_bytes(&self, bytes: &[u8], confirmation: Confirmation) -> Result<ImportOutcome> {
        let guard = self.begin()?;
        let table = match parse_table(bytes) {
            Ok(table) => table,
            Err(e) => return Err(self.abort(e)),
        };
        self.execute(table, confirmation, guard).await
    }

    /// Run the job on a Tokio task.
    ///
    /// The job is registered before this returns, so a second start fails
    /// with `Conflict` right away.
    pub fn spawn(self: Arc<Self>, table: Table, confirmation: Confirmation) -> Result<ImportHandle> {
        let guard = self.begin()?;
        let observer = self.subscribe();
        let job_id = self.publisher.current().job_id;

        let controller = Arc::clone(&self);
        let task = tokio::spawn(async move { controller.execute(table, confirmation, guard).await });

        Ok(ImportHandle {
            job_id,
            observer: Some(observer),
            task,
        })
    }

    pub fn subscribe(&self) -> ProgressObserver {
        self.publisher.subscribe()
    }

    pub fn snapshot(&self) -> Arc<ImportSnapshot> {
        self.publisher.current()
    }

    /// Whether anyone is still watching progress
    pub fn is_observed(&self) -> bool {
        self.publisher.observer_count() > 0
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// The final summary, once the job is terminal. Marks it as read.
    pub fn take_summary(&self) -> Option<ImportSummary> {
        let snapshot = self.publisher.current();
        if !snapshot.is_terminal() {
            return None;
        }
        self.acknowledged.store(true, Ordering::Release);
        Some(snapshot.summary())
    }

    /// Clear counters and errors back to `Idle`
    pub fn reset(&self) -> Result<()> {
        if self.is_running() {
            return Err(ImportError::conflict("an import job is still running"));
        }

        self.ensure_summary_read()?;

        self.publisher.publish(|s| {
            *s = ImportSnapshot::default();
        });
        Ok(())
    }

    /// A terminal summary must be taken before it is replaced
    fn ensure_summary_read(&self) -> Result<()> {
        let snapshot = self.publisher.current();
        if snapshot.is_terminal() && !self.acknowledged.load(Ordering::Acquire) {
            return Err(ImportError::conflict(
                "the final summary has not been read yet",
            ));
        }
        Ok(())
    }

    fn begin(&self) -> Result<RunGuard> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ImportError::conflict("an import job is already running"));
        }
        let guard = RunGuard {
            running: Arc::clone(&self.running),
        };
        self.ensure_summary_read()?;

        let job_id = Uuid::new_v4();
        self.publisher.publish(|s| {
            *s = ImportSnapshot {
                job_id: Some(job_id),
                phase: ImportPhase::Validating,
                started_at: Some(Utc::now()),
                ..ImportSnapshot::default()
            };
        });
        info!(%job_id, "Import job started");

        Ok(guard)
    }

    async fn execute(
        &self,
        table: Table,
        confirmation: Confirmation,
        _guard: RunGuard,
    ) -> Result<ImportOutcome> {
        let total = table.len();
        self.publisher.publish(|s| s.total = total);

        if let Err(problems) = validate_table(&table) {
            return Err(self.abort(ImportError::Structural(problems)));
        }

        if self.settings.requires_confirmation(total) && confirmation != Confirmation::Confirmed {
            warn!(
                total,
                threshold = self.settings.confirm_threshold,
                "Import needs confirmation"
            );
            self.publisher.publish(|s| {
                *s = ImportSnapshot::default();
            });
            return Ok(ImportOutcome::ConfirmationRequired {
                total,
                threshold: self.settings.confirm_threshold,
            });
        }

        self.enter(ImportPhase::Resolving);
        let lookup = match ReferenceLookup::load(self.store.as_ref()).await {
            Ok(lookup) => lookup,
            Err(e) => return Err(self.abort(e)),
        };

        self.enter(ImportPhase::Importing);
        BatchExecutor::new(self.store.as_ref(), &lookup, &self.settings, &self.publisher)
            .run(&table.rows)
            .await;

        self.acknowledged.store(false, Ordering::Release);
        let snapshot = self.publisher.publish(|s| {
            s.phase = if s.failed > 0 {
                ImportPhase::CompletedWithErrors
            } else {
                ImportPhase::Completed
            };
            s.finished_at = Some(Utc::now());
        });

        info!(
            phase = %snapshot.phase,
            total = snapshot.total,
            success = snapshot.success,
            failed = snapshot.failed,
            "Import job finished"
        );
        Ok(ImportOutcome::Finished(snapshot.summary()))
    }

    fn enter(&self, phase: ImportPhase) {
        self.publisher.publish(|s| s.phase = phase);
        info!(%phase, "Import phase changed");
    }

    fn abort(&self, err: ImportError) -> ImportError {
        error!(code = err.code(), "Import job aborted: {}", err);
        self.acknowledged.store(false, Ordering::Release);
        let reason = err.to_string();
        self.publisher.publish(|s| {
            s.phase = ImportPhase::Aborted;
            s.abort_reason = Some(reason);
            s.finished_at = Some(Utc::now());
        });
        err
    }
}

/// A job running on a Tokio task
#[derive(Debug)]
pub struct ImportHandle {
    job_id: Option<Uuid>,
    observer: Option<ProgressObserver>,
    task: JoinHandle<Result<ImportOutcome>>,
}

impl ImportHandle {
    pub fn job_id(&self) -> Option<Uuid> {
        self.job_id
    }

    /// Progress of this job, until detached
    pub fn observer(&mut self) -> Option<&mut ProgressObserver> {
        self.observer.as_mut()
    }

    /// Stop watching. The job keeps running to its terminal phase.
    pub fn detach(&mut self) {
        self.observer = None;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the job to end
    pub async fn wait(self) -> Result<ImportOutcome> {
        self.task.await?
    }
}
