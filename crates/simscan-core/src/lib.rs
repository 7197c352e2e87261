pub mod analyzer;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod progress;
pub mod report;
pub mod store;

pub use analyzer::{AnalyzerConfig, MatchedSequence, Method, SequenceKind};
pub use compare::{CancelToken, ComparisonResult, Status};
pub use config::AppConfig;
pub use engine::{ReportEngine, ReportRun};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use report::{Report, ReportSummary};
pub use store::{DocumentStore, MasterKey, Plaintext};
