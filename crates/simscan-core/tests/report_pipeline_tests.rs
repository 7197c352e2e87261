use simscan_core::store::{DocumentStore, MasterKey};
use simscan_core::{
    AnalyzerConfig, CancelToken, Error, Method, ReportEngine, SilentReporter,
};
use tempfile::tempdir;

fn test_key() -> MasterKey {
    MasterKey::from_bytes([7u8; 32])
}

fn store_with_docs(scratch: &std::path::Path, docs: &[(&str, &str)]) -> DocumentStore {
    let store = DocumentStore::open_in_memory(scratch).unwrap();
    let key = test_key();
    for (name, body) in docs {
        store.encrypt_and_store(&key, body, name).unwrap();
    }
    store
}

fn run_report(store: &DocumentStore, method: Method) -> simscan_core::ReportRun {
    let key = test_key();
    let engine = ReportEngine::new(store, &key, AnalyzerConfig::default());
    engine
        .generate_report(method, &SilentReporter, &CancelToken::new())
        .unwrap()
}

#[test]
fn test_three_documents_produce_three_ordered_comparisons() {
    let scratch = tempdir().unwrap();
    let store = store_with_docs(
        scratch.path(),
        &[
            ("a.txt", "the quick brown fox jumps over the lazy dog"),
            ("b.txt", "a quick brown cat sleeps while the dog runs away"),
            ("c.txt", "completely different text about rust programming"),
        ],
    );

    let run = run_report(&store, Method::WordBased);
    assert!(!run.is_empty_corpus());
    assert!(run.decrypt_failures.is_empty());

    let report = &run.report;
    assert_eq!(report.summary.total_files, 3);
    assert_eq!(report.summary.total_comparisons, 3);
    assert_eq!(report.comparisons.len(), 3);

    // Pairs come out in outer/inner order over the snapshot.
    let pairs: Vec<(&str, &str)> = report
        .comparisons
        .iter()
        .map(|c| (c.file1.as_str(), c.file2.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("a.txt", "b.txt"),
            ("a.txt", "c.txt"),
            ("b.txt", "c.txt"),
        ]
    );
}

#[test]
fn test_summary_aggregates_match_the_comparisons() {
    let scratch = tempdir().unwrap();
    let shared = "one two three four five six seven eight nine ten";
    let store = store_with_docs(
        scratch.path(),
        &[
            ("x.txt", shared),
            ("y.txt", shared),
            ("z.txt", "nothing in common whatsoever here today"),
        ],
    );

    let run = run_report(&store, Method::WordBased);
    let summary = &run.report.summary;
    let comparisons = &run.report.comparisons;

    let sum: u64 = comparisons.iter().map(|c| c.similarity_percent as u64).sum();
    let mean = sum as f64 / comparisons.len() as f64;
    assert!((summary.average_similarity - (mean * 100.0).round() / 100.0).abs() < 1e-9);

    let max = comparisons
        .iter()
        .map(|c| c.similarity_percent)
        .max()
        .unwrap();
    assert_eq!(summary.highest_similarity, max);
    assert_eq!(max, 100);

    assert_eq!(
        summary.suspicious_pairs,
        comparisons
            .iter()
            .filter(|c| c.similarity_percent >= 50)
            .count()
    );
    assert_eq!(
        summary.high_risk_pairs,
        comparisons
            .iter()
            .filter(|c| c.similarity_percent >= 80)
            .count()
    );
    assert_eq!(summary.high_risk_pairs, 1);
}

#[test]
fn test_fewer_than_two_documents_is_an_empty_corpus_not_an_error() {
    let scratch = tempdir().unwrap();

    let empty = store_with_docs(scratch.path(), &[]);
    let run = run_report(&empty, Method::WordBased);
    assert!(run.is_empty_corpus());
    assert_eq!(run.report.summary.total_files, 0);
    assert_eq!(run.report.summary.total_comparisons, 0);
    assert_eq!(run.report.summary.average_similarity, 0.0);
    assert!(run.report.comparisons.is_empty());

    let single = store_with_docs(scratch.path(), &[("only.txt", "some text")]);
    let run = run_report(&single, Method::WordBased);
    assert!(run.is_empty_corpus());
    assert_eq!(run.report.summary.total_files, 1);
    assert!(run.report.comparisons.is_empty());
}

#[test]
fn test_undecryptable_document_is_excluded_and_flagged() {
    let scratch = tempdir().unwrap();
    let store = store_with_docs(
        scratch.path(),
        &[
            ("good1.txt", "alpha beta gamma delta epsilon"),
            ("good2.txt", "alpha beta gamma entirely different"),
            ("broken.txt", "this one will be corrupted"),
        ],
    );

    // Corrupt the third document's ciphertext so decryption fails.
    store
        .database()
        .connection()
        .execute(
            "UPDATE document SET ciphertext = ?1 WHERE original_filename = 'broken.txt'",
            rusqlite::params![vec![0u8; 7]],
        )
        .unwrap();

    let run = run_report(&store, Method::WordBased);

    assert_eq!(run.decrypt_failures.len(), 1);
    assert_eq!(run.decrypt_failures[0].original_filename, "broken.txt");
    assert!(!run.decrypt_failures[0].reason.is_empty());

    // The surviving pair still compares, and counts reflect exclusion.
    assert_eq!(run.report.summary.total_files, 2);
    assert_eq!(run.report.summary.total_comparisons, 1);
    assert_eq!(run.report.comparisons[0].file1, "good1.txt");
    assert_eq!(run.report.comparisons[0].file2, "good2.txt");
}

#[test]
fn test_cancellation_aborts_the_run() {
    let scratch = tempdir().unwrap();
    let store = store_with_docs(
        scratch.path(),
        &[("a.txt", "some words here"), ("b.txt", "other words there")],
    );

    let key = test_key();
    let engine = ReportEngine::new(&store, &key, AnalyzerConfig::default());
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = engine.generate_report(Method::WordBased, &SilentReporter, &cancel);
    assert!(matches!(result, Err(Error::Cancelled)));
}

#[test]
fn test_report_json_shape() {
    let scratch = tempdir().unwrap();
    let shared = "we hold these truths to be self evident that all men are created equal";
    let store = store_with_docs(scratch.path(), &[("p.txt", shared), ("q.txt", shared)]);

    let run = run_report(&store, Method::WordBased);
    let value = serde_json::to_value(&run.report).unwrap();

    assert_eq!(value["method"], "word_based");
    assert!(value["timestamp"].is_string());

    let summary = &value["summary"];
    for field in [
        "total_files",
        "total_comparisons",
        "average_similarity",
        "highest_similarity",
        "suspicious_pairs",
        "high_risk_pairs",
    ] {
        assert!(summary.get(field).is_some(), "summary missing {field}");
    }

    let comparison = &value["comparisons"][0];
    for field in [
        "file1",
        "file2",
        "similarity",
        "common_segments",
        "status",
        "method",
        "matched_sequences",
    ] {
        assert!(comparison.get(field).is_some(), "comparison missing {field}");
    }
    assert_eq!(comparison["similarity"], 100);
    assert_eq!(comparison["status"], "HIGH");
    assert_eq!(comparison["method"], "word_based");

    let sequence = &comparison["matched_sequences"][0];
    assert_eq!(sequence["type"], "common_word_run");
    assert!(sequence["content"].is_string());
    assert!(sequence["length"].is_u64());
}

#[test]
fn test_char_and_line_methods_run_end_to_end() {
    let scratch = tempdir().unwrap();
    let store = store_with_docs(
        scratch.path(),
        &[
            ("one.txt", "shared sentence on its own line\nunique to the first file"),
            ("two.txt", "shared sentence on its own line\nunique to the second file"),
        ],
    );

    let line_run = run_report(&store, Method::LineBased);
    assert_eq!(line_run.report.comparisons.len(), 1);
    assert_eq!(line_run.report.comparisons[0].similarity_percent, 50);
    assert_eq!(line_run.report.comparisons[0].common_segment_count, 1);

    let char_run = run_report(&store, Method::CharBased);
    assert_eq!(char_run.report.comparisons.len(), 1);
    // The shared first line is well over the substring threshold.
    assert!(char_run.report.comparisons[0].similarity_percent > 0);
}
