/// Trait for reporting report-generation progress.
///
/// The CLI implements this with indicatif bars; tests use the silent
/// variant. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_snapshot_start(&self) {}
    fn on_snapshot_complete(&self, _documents: usize, _duration_secs: f64) {}
    fn on_compare_start(&self, _total_pairs: usize) {}
    fn on_compare_progress(&self, _pairs_done: usize, _total_pairs: usize) {}
    fn on_compare_complete(&self, _total_pairs: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
