//! Pairwise comparator: enumerates every unordered document pair once and
//! evaluates them in parallel.
//!
//! Each pair's decrypt → analyze → discard sequence is one unit of work.
//! A document's plaintext is decrypted at most once per run, shared behind
//! an `Arc` across the pairs that still need it, and dropped from the map
//! as soon as its pending-pair count reaches zero.

use crate::analyzer::{self, AnalyzerConfig, MatchedSequence, Method};
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::store::crypto::{self, MasterKey, Plaintext};
use crate::store::models::EncryptedDocument;
use dashmap::DashMap;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Risk classification from the similarity percentage. Lower bounds are
/// inclusive: exactly 80 is HIGH, exactly 50 is MEDIUM, exactly 20 is LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    High,
    Medium,
    Low,
    Minimal,
}

impl Status {
    pub fn classify(similarity_percent: u8) -> Status {
        match similarity_percent {
            80..=100 => Status::High,
            50..=79 => Status::Medium,
            20..=49 => Status::Low,
            _ => Status::Minimal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::High => "HIGH",
            Status::Medium => "MEDIUM",
            Status::Low => "LOW",
            Status::Minimal => "MINIMAL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub file1: String,
    pub file2: String,
    #[serde(rename = "similarity")]
    pub similarity_percent: u8,
    #[serde(rename = "common_segments")]
    pub common_segment_count: usize,
    pub status: Status,
    pub method: Method,
    pub matched_sequences: Vec<MatchedSequence>,
}

/// Cooperative cancellation flag, checked at pair granularity. Abandons
/// the remaining pairs; never leaves a partially populated result.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A document that could not be decrypted during the run. Such documents
/// are excluded from every comparison and surfaced here, never silently
/// dropped.
#[derive(Debug, Clone)]
pub struct DecryptFailure {
    pub document_id: i64,
    pub original_filename: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct PairwiseOutcome {
    /// Completed comparisons in pair-enumeration order.
    pub comparisons: Vec<ComparisonResult>,
    pub failures: Vec<DecryptFailure>,
}

/// Compare every unordered pair of `documents` exactly once (input order,
/// outer then inner) with the selected method. Fewer than two documents
/// yields zero comparisons, which is not an error.
pub fn compare_all(
    documents: &[EncryptedDocument],
    key: &MasterKey,
    method: Method,
    config: &AnalyzerConfig,
    cancel: &CancelToken,
    reporter: &dyn ProgressReporter,
) -> Result<PairwiseOutcome, Error> {
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for i in 0..documents.len() {
        for j in (i + 1)..documents.len() {
            pairs.push((i, j));
        }
    }

    reporter.on_compare_start(pairs.len());

    // Pending-pair count per document; the plaintext is released once no
    // remaining pair references it.
    let remaining: Vec<AtomicUsize> = documents
        .iter()
        .map(|_| AtomicUsize::new(documents.len().saturating_sub(1)))
        .collect();
    let plaintexts: DashMap<usize, Arc<Plaintext>> = DashMap::new();
    let failures: DashMap<usize, String> = DashMap::new();
    let done = AtomicUsize::new(0);
    let total_pairs = pairs.len();

    let get_or_decrypt = |index: usize| -> Option<Arc<Plaintext>> {
        if let Some(plain) = plaintexts.get(&index) {
            return Some(plain.clone());
        }
        if failures.contains_key(&index) {
            return None;
        }
        let doc = &documents[index];
        match crypto::decrypt(key, &doc.iv, &doc.ciphertext) {
            Ok(plain) => {
                let plain = Arc::new(plain);
                plaintexts.insert(index, plain.clone());
                Some(plain)
            }
            Err(err) => {
                tracing::error!(
                    "Failed to decrypt '{}' (id {}): {}",
                    doc.original_filename,
                    doc.id,
                    err
                );
                failures.insert(index, err.to_string());
                None
            }
        }
    };

    let release = |index: usize| {
        if remaining[index].fetch_sub(1, Ordering::AcqRel) == 1 {
            plaintexts.remove(&index);
        }
    };

    let results: Vec<Option<ComparisonResult>> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let result = if cancel.is_cancelled() {
                None
            } else {
                match (get_or_decrypt(i), get_or_decrypt(j)) {
                    (Some(plain_a), Some(plain_b)) => {
                        let similarity =
                            analyzer::compare(method, config, plain_a.as_str(), plain_b.as_str());
                        Some(ComparisonResult {
                            file1: documents[i].original_filename.clone(),
                            file2: documents[j].original_filename.clone(),
                            similarity_percent: similarity.percent,
                            common_segment_count: similarity.sequences.len(),
                            status: Status::classify(similarity.percent),
                            method,
                            matched_sequences: similarity.sequences,
                        })
                    }
                    _ => None,
                }
            };
            release(i);
            release(j);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            reporter.on_compare_progress(finished, total_pairs);
            result
        })
        .collect();

    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let failures: Vec<DecryptFailure> = {
        let mut list: Vec<DecryptFailure> = failures
            .into_iter()
            .map(|(index, reason)| DecryptFailure {
                document_id: documents[index].id,
                original_filename: documents[index].original_filename.clone(),
                reason,
            })
            .collect();
        list.sort_by_key(|failure| failure.document_id);
        list
    };

    Ok(PairwiseOutcome {
        comparisons: results.into_iter().flatten().collect(),
        failures,
    })
}
