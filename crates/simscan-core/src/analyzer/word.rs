//! Word-based method (default): greedy longest common word runs.
//!
//! The primary paraphrase-resistant signal — matched runs tolerate
//! insertions and deletions between them.

use super::runs::greedy_common_runs;
use super::{effective_min_len, percent, AnalyzerConfig, MatchedSequence, SequenceKind, Similarity};

/// Lowercase word tokens, split on non-alphanumeric boundaries.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

pub fn compare(config: &AnalyzerConfig, a: &str, b: &str) -> Similarity {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return Similarity::none();
    }

    let larger = tokens_a.len().max(tokens_b.len());

    // Pattern side is chosen deterministically (shorter, ties by content)
    // so the result is independent of argument order.
    let (pattern, text) = if (tokens_a.len(), &tokens_a) <= (tokens_b.len(), &tokens_b) {
        (&tokens_a, &tokens_b)
    } else {
        (&tokens_b, &tokens_a)
    };

    let min_len = effective_min_len(config.min_run_words(), pattern.len());
    let runs = greedy_common_runs(pattern, text, min_len);

    let matched_words: usize = runs.iter().map(|run| run.len).sum();
    let sequences = runs
        .iter()
        .map(|run| MatchedSequence {
            kind: SequenceKind::CommonWordRun,
            content: pattern[run.pattern_start..run.pattern_start + run.len].join(" "),
            length: run.len,
        })
        .collect();

    Similarity {
        percent: percent(matched_words, larger),
        sequences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits_on_non_alphanumeric() {
        assert_eq!(
            tokenize("Hello, World! It's 2024."),
            vec!["hello", "world", "it", "s", "2024"]
        );
    }

    #[test]
    fn test_tokenize_discards_empty_tokens() {
        assert_eq!(tokenize("  a --- b  "), vec!["a", "b"]);
        assert!(tokenize("...!?").is_empty());
    }

    #[test]
    fn test_fox_jumps_scenario() {
        let config = AnalyzerConfig::default();
        let sim = compare(&config, "the quick fox jumps", "a slow fox jumps over");
        assert_eq!(sim.percent, 40);
        assert_eq!(sim.sequences.len(), 1);
        assert_eq!(sim.sequences[0].content, "fox jumps");
        assert_eq!(sim.sequences[0].length, 2);
    }

    #[test]
    fn test_identical_single_word_documents() {
        // Threshold is clamped to the shorter document, so identity holds
        // even below the configured minimum run length.
        let config = AnalyzerConfig::default();
        let sim = compare(&config, "hello", "hello");
        assert_eq!(sim.percent, 100);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let config = AnalyzerConfig::default();
        let sim = compare(&config, "The Quick Fox!", "the quick fox");
        assert_eq!(sim.percent, 100);
    }

    #[test]
    fn test_no_common_runs() {
        let config = AnalyzerConfig::default();
        let sim = compare(&config, "alpha beta gamma", "delta epsilon zeta");
        assert_eq!(sim.percent, 0);
        assert!(sim.sequences.is_empty());
    }

    #[test]
    fn test_empty_document_scores_zero() {
        let config = AnalyzerConfig::default();
        assert_eq!(compare(&config, "", "some words here").percent, 0);
    }
}
