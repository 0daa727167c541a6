//! Resumable progress tracking for batch migrations.
//!
//! A migration job runs in batches against storage the subsystem never sees.
//! The driver owns a [`MigrationProgress`] value, persists it after every
//! batch, and can resume from `last_processed_id` after a crash. All
//! transitions return new snapshots; nothing here mutates in place, so a
//! checkpointed value is always internally consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record that failed during a batch, in processing order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationFailure {
    pub record_id: String,
    pub error: String,
}

impl MigrationFailure {
    pub fn new(record_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            error: error.into(),
        }
    }
}

/// Snapshot of a batch migration job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationProgress {
    pub total_records: u64,
    pub migrated_records: u64,
    pub failed_records: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Resumption cursor: the last record id the driver processed.
    pub last_processed_id: Option<String>,
    pub failures: Vec<MigrationFailure>,
}

impl MigrationProgress {
    /// Starts tracking a job with a known total.
    pub fn new(total_records: u64) -> Self {
        Self {
            total_records,
            migrated_records: 0,
            failed_records: 0,
            started_at: Utc::now(),
            completed_at: None,
            last_processed_id: None,
            failures: Vec::new(),
        }
    }

    /// Folds one processed batch into a new snapshot.
    ///
    /// `batch_size` counts every record the batch touched; records listed in
    /// `failures` are subtracted from the migrated count and appended to the
    /// failure list. The cursor advances to `last_id` when given, otherwise
    /// keeps its previous value.
    #[must_use]
    pub fn record_batch(
        &self,
        batch_size: u64,
        failures: Vec<MigrationFailure>,
        last_id: Option<String>,
    ) -> Self {
        let failed = failures.len() as u64;
        let mut all_failures = self.failures.clone();
        all_failures.extend(failures);

        Self {
            total_records: self.total_records,
            migrated_records: self.migrated_records + batch_size.saturating_sub(failed),
            failed_records: self.failed_records + failed,
            started_at: self.started_at,
            completed_at: self.completed_at,
            last_processed_id: last_id.or_else(|| self.last_processed_id.clone()),
            failures: all_failures,
        }
    }

    /// Finalizes the job by stamping `completed_at`.
    #[must_use]
    pub fn complete(&self) -> Self {
        Self {
            completed_at: Some(Utc::now()),
            ..self.clone()
        }
    }

    /// Whether the job has been finalized.
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Processed share of the job, for operator display.
    pub fn percent_processed(&self) -> f64 {
        if self.total_records == 0 {
            return 100.0;
        }
        (self.migrated_records + self.failed_records) as f64 / self.total_records as f64 * 100.0
    }
}
