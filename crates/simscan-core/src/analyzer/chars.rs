//! Char-based method: iterative longest common substring extraction.
//!
//! Operates on the raw character sequences, whitespace preserved. Each
//! round's longest-substring search approaches O(n*m) in the worst case,
//! so this is the most expensive method.

use super::runs::greedy_common_runs;
use super::{effective_min_len, percent, AnalyzerConfig, MatchedSequence, SequenceKind, Similarity};

pub fn compare(config: &AnalyzerConfig, a: &str, b: &str) -> Similarity {
    let chars_a: Vec<char> = a.chars().collect();
    let chars_b: Vec<char> = b.chars().collect();

    if chars_a.is_empty() || chars_b.is_empty() {
        return Similarity::none();
    }

    let larger = chars_a.len().max(chars_b.len());

    let (pattern, text) = if (chars_a.len(), &chars_a) <= (chars_b.len(), &chars_b) {
        (&chars_a, &chars_b)
    } else {
        (&chars_b, &chars_a)
    };

    let min_len = effective_min_len(config.min_substring_chars(), pattern.len());
    let runs = greedy_common_runs(pattern, text, min_len);

    let matched_chars: usize = runs.iter().map(|run| run.len).sum();
    let sequences = runs
        .iter()
        .map(|run| MatchedSequence {
            kind: SequenceKind::CommonSubstring,
            content: pattern[run.pattern_start..run.pattern_start + run.len]
                .iter()
                .collect(),
            length: run.len,
        })
        .collect();

    Similarity {
        percent: percent(matched_chars, larger),
        sequences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_score_100() {
        let config = AnalyzerConfig::default();
        let text = "The quick brown fox jumps over the lazy dog.";
        let sim = compare(&config, text, text);
        assert_eq!(sim.percent, 100);
        assert_eq!(sim.sequences.len(), 1);
        assert_eq!(sim.sequences[0].length, text.chars().count());
    }

    #[test]
    fn test_identity_holds_below_configured_threshold() {
        // 5 characters, well under the default 20-char minimum.
        let config = AnalyzerConfig::default();
        assert_eq!(compare(&config, "short", "short").percent, 100);
    }

    #[test]
    fn test_shared_substring_below_threshold_not_counted() {
        let config = AnalyzerConfig::default();
        // Shares "identical segment" (17 chars), under the 20-char minimum.
        let a = "AAAA identical segment BBBBBBBB";
        let b = "CCCC identical segment DDDDDDDD";
        assert_eq!(compare(&config, a, b).percent, 0);
    }

    #[test]
    fn test_long_shared_substring_counted() {
        let config = AnalyzerConfig::default();
        let shared = "this exact sentence appears in both documents";
        let a = format!("prefix one. {shared} suffix one padding.");
        let b = format!("{shared} completely different tail text here.");
        let sim = compare(&config, &a, &b);
        assert!(sim.percent > 0);
        assert!(sim
            .sequences
            .iter()
            .any(|s| s.content.contains("appears in both")));
    }

    #[test]
    fn test_whitespace_is_significant() {
        let config = AnalyzerConfig::new(5, 5).unwrap();
        let sim = compare(&config, "a b c d e", "abcde");
        assert_eq!(sim.percent, 0);
    }

    #[test]
    fn test_lowered_threshold_picks_up_short_matches() {
        let config = AnalyzerConfig::new(2, 4).unwrap();
        let sim = compare(&config, "xxxx tail", "xxxx head");
        assert!(sim.percent > 0);
        assert_eq!(sim.sequences[0].content, "xxxx ");
    }
}
