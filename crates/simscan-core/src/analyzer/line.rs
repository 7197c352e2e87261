//! Line-based method: exact-match multiset intersection of lines.
//!
//! Fastest method. Insensitive to reordering of non-matching lines,
//! sensitive to any character difference inside a line.

use super::{percent, MatchedSequence, SequenceKind, Similarity};
use ahash::AHashMap;

/// Line-ending normalized, trailing whitespace trimmed, blank lines kept.
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r').trim_end())
        .collect()
}

pub fn compare(a: &str, b: &str) -> Similarity {
    if a.is_empty() || b.is_empty() {
        return Similarity::none();
    }

    let lines_a = split_lines(a);
    let lines_b = split_lines(b);

    let larger = lines_a.len().max(lines_b.len());
    let (shorter, longer) = if lines_a.len() <= lines_b.len() {
        (&lines_a, &lines_b)
    } else {
        (&lines_b, &lines_a)
    };

    // Occurrence budget from the shorter side: a line matches at most once
    // per occurrence in each document, so duplicate identical lines in both
    // documents each count.
    let mut budget: AHashMap<&str, usize> = AHashMap::new();
    for line in shorter.iter() {
        *budget.entry(*line).or_insert(0) += 1;
    }

    let mut sequences = Vec::new();
    for line in longer.iter() {
        if let Some(remaining) = budget.get_mut(line) {
            if *remaining > 0 {
                *remaining -= 1;
                sequences.push(MatchedSequence {
                    kind: SequenceKind::CommonLine,
                    content: line.to_string(),
                    length: 1,
                });
            }
        }
    }

    Similarity {
        percent: percent(sequences.len(), larger),
        sequences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_score_100() {
        let text = "alpha\nbeta\ngamma";
        let sim = compare(text, text);
        assert_eq!(sim.percent, 100);
        assert_eq!(sim.sequences.len(), 3);
    }

    #[test]
    fn test_disjoint_documents_score_0() {
        let sim = compare("alpha\nbeta", "gamma\ndelta");
        assert_eq!(sim.percent, 0);
        assert!(sim.sequences.is_empty());
    }

    #[test]
    fn test_multiset_not_set_intersection() {
        // "dup" twice in both documents: each occurrence counts once.
        let sim = compare("dup\ndup\nx", "dup\ndup\ny");
        assert_eq!(sim.sequences.len(), 2);
        assert_eq!(sim.percent, 67);
    }

    #[test]
    fn test_duplicate_capped_by_shorter_side() {
        let sim = compare("dup", "dup\ndup\ndup");
        assert_eq!(sim.sequences.len(), 1);
        assert_eq!(sim.percent, 33);
    }

    #[test]
    fn test_reordered_lines_still_match() {
        let sim = compare("one\ntwo\nthree", "three\none\ntwo");
        assert_eq!(sim.percent, 100);
    }

    #[test]
    fn test_crlf_normalized_and_trailing_whitespace_trimmed() {
        let sim = compare("alpha  \r\nbeta\r\n", "alpha\nbeta\n");
        assert_eq!(sim.percent, 100);
    }

    #[test]
    fn test_any_character_difference_breaks_the_line() {
        let sim = compare("the quick brown fox", "the quick brown fax");
        assert_eq!(sim.percent, 0);
    }
}
