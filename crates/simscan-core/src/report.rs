//! Report builder: aggregates comparator output into summary statistics.

use crate::analyzer::Method;
use crate::compare::ComparisonResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Documents that took part in the run (decrypt failures excluded).
    pub total_files: usize,
    pub total_comparisons: usize,
    /// Mean similarity over all comparisons, rounded to 2 decimals.
    pub average_similarity: f64,
    pub highest_similarity: u8,
    /// Pairs with similarity >= 50.
    pub suspicious_pairs: usize,
    /// Pairs with similarity >= 80.
    pub high_risk_pairs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub method: Method,
    pub timestamp: String,
    pub summary: ReportSummary,
    pub comparisons: Vec<ComparisonResult>,
}

/// Build a report from completed comparisons. With fewer than two
/// participating documents both counters and averages are zero; that is an
/// empty-corpus result, not a failure.
pub fn build(method: Method, total_files: usize, comparisons: Vec<ComparisonResult>) -> Report {
    let total_comparisons = comparisons.len();

    let average_similarity = if total_comparisons == 0 {
        0.0
    } else {
        let sum: u64 = comparisons
            .iter()
            .map(|c| c.similarity_percent as u64)
            .sum();
        let mean = sum as f64 / total_comparisons as f64;
        (mean * 100.0).round() / 100.0
    };

    let highest_similarity = comparisons
        .iter()
        .map(|c| c.similarity_percent)
        .max()
        .unwrap_or(0);
    let suspicious_pairs = comparisons
        .iter()
        .filter(|c| c.similarity_percent >= 50)
        .count();
    let high_risk_pairs = comparisons
        .iter()
        .filter(|c| c.similarity_percent >= 80)
        .count();

    Report {
        method,
        timestamp: chrono::Utc::now().to_rfc3339(),
        summary: ReportSummary {
            total_files,
            total_comparisons,
            average_similarity,
            highest_similarity,
            suspicious_pairs,
            high_risk_pairs,
        },
        comparisons,
    }
}
