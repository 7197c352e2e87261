use crate::analyzer::{AnalyzerConfig, Method};
use crate::compare::{self, CancelToken, DecryptFailure};
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::report::{self, Report};
use crate::store::{DocumentStore, MasterKey};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Drives one report run: snapshot the ciphertext rows, evaluate all
/// pairs, aggregate into a report.
pub struct ReportEngine<'a> {
    store: &'a DocumentStore,
    key: &'a MasterKey,
    analyzers: AnalyzerConfig,
}

#[derive(Debug)]
pub struct ReportRun {
    pub report: Report,
    /// Documents excluded from the run because they failed to decrypt.
    pub decrypt_failures: Vec<DecryptFailure>,
    pub snapshot_duration: Duration,
    pub compare_duration: Duration,
}

impl ReportRun {
    /// True when fewer than two documents took part: the report carries
    /// zero comparisons and a summary of zeros, which is not a failure.
    pub fn is_empty_corpus(&self) -> bool {
        self.report.summary.total_files < 2
    }
}

impl<'a> ReportEngine<'a> {
    pub fn new(store: &'a DocumentStore, key: &'a MasterKey, analyzers: AnalyzerConfig) -> Self {
        ReportEngine {
            store,
            key,
            analyzers,
        }
    }

    /// Run the full report pipeline:
    /// 1. Snapshot all ciphertext rows (writes after this point do not
    ///    affect the run)
    /// 2. Decrypt and compare all pairs with the selected method
    /// 3. Aggregate into summary statistics
    pub fn generate_report(
        &self,
        method: Method,
        reporter: &dyn ProgressReporter,
        cancel: &CancelToken,
    ) -> Result<ReportRun, Error> {
        info!("Generating report (method: {})...", method);

        reporter.on_snapshot_start();
        let snapshot_start = Instant::now();
        let snapshot = self.store.snapshot()?;
        let snapshot_duration = snapshot_start.elapsed();
        reporter.on_snapshot_complete(snapshot.len(), snapshot_duration.as_secs_f64());

        if snapshot.len() < 2 {
            info!(
                "Only {} document(s) stored, producing empty-corpus report",
                snapshot.len()
            );
        }

        let compare_start = Instant::now();
        let outcome = compare::compare_all(
            &snapshot,
            self.key,
            method,
            &self.analyzers,
            cancel,
            reporter,
        )?;
        let compare_duration = compare_start.elapsed();
        reporter.on_compare_complete(outcome.comparisons.len(), compare_duration.as_secs_f64());

        for failure in &outcome.failures {
            warn!(
                "Document '{}' (id {}) excluded from report: {}",
                failure.original_filename, failure.document_id, failure.reason
            );
        }

        let total_files = snapshot.len() - outcome.failures.len();
        let report = report::build(method, total_files, outcome.comparisons);

        info!(
            "Report complete: {} files, {} comparisons, highest similarity {}%",
            report.summary.total_files,
            report.summary.total_comparisons,
            report.summary.highest_similarity
        );

        Ok(ReportRun {
            report,
            decrypt_failures: outcome.failures,
            snapshot_duration,
            compare_duration,
        })
    }
}
